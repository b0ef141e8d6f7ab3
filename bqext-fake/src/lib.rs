//! In memory implementation of the query service, understanding the
//! queries issued by the dataset operations.
mod connection;
mod driver;
mod interpret;
mod storage;

pub use connection::*;
pub use driver::*;
pub use interpret::Script;
pub use storage::{Partition, Table, UNPARTITIONED};
