pub use bqext_core::*;
pub use bqext_macros::Model;
