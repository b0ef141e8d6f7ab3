mod as_value;
mod connection;
mod context;
mod dataset;
mod dedup;
mod driver;
mod error;
mod executor;
mod job;
mod model;
mod partition;
mod query_config;
mod row;
mod table_ref;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use connection::*;
pub use context::*;
pub use dataset::*;
pub use dedup::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use job::*;
pub use model::*;
pub use partition::*;
pub use query_config::*;
pub use row::*;
pub use table_ref::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
