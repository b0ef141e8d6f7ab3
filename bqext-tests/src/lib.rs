mod dedup;
mod partition;
mod single_row;

use crate::{
    dedup::{dedup, dedup_requires_partition},
    partition::{partition_info, table_info},
    single_row::{single_row, single_row_errors},
};
use bqext::{Dataset, Executor, RowLabeled, TableRef};
use log::LevelFilter;
use std::env;

/// Access to the tables of the service under test, outside of the queries.
pub trait Fixtures {
    /// Appends `rows` to `table`, creating it (and its partition) if needed.
    fn insert_rows(&self, table: &TableRef, rows: Vec<RowLabeled>);

    /// Current content of `table`, or of its partition.
    fn table_rows(&self, table: &TableRef) -> Vec<RowLabeled>;
}

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<E: Executor, F: Fixtures>(dataset: &mut Dataset<E>, fixtures: &F) {
    single_row(dataset, fixtures).await;
    single_row_errors(dataset, fixtures).await;
    partition_info(dataset, fixtures).await;
    table_info(dataset, fixtures).await;
    dedup(dataset, fixtures).await;
    dedup_requires_partition(dataset, fixtures).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
