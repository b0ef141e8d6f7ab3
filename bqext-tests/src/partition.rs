use crate::{Fixtures, silent_logs};
use bqext::{BqError, Dataset, Executor, RowLabeled, Value, error_kind};

fn event(id: i64, kind: &'static str) -> RowLabeled {
    RowLabeled::from_iter([("event_id", Value::from(id)), ("kind", Value::from(kind))])
}

pub async fn partition_info<E: Executor, F: Fixtures>(dataset: &mut Dataset<E>, fixtures: &F) {
    fixtures.insert_rows(
        &dataset.table("partition_events$20230101"),
        vec![event(1, "click"), event(2, "view")],
    );
    fixtures.insert_rows(
        &dataset.table("partition_events$20230102"),
        vec![event(3, "click")],
    );

    let info = dataset
        .get_partition_info("partition_events", "20230101")
        .await
        .expect("Failed to get the partition info");
    assert_eq!(info.partition_id, "20230101");
    assert!(info.creation_time <= info.last_modified);

    // Qualified legacy name
    let context = dataset.context().clone();
    let qualified = format!(
        "{}:{}.partition_events",
        context.project_id, context.dataset_id
    );
    let other = dataset
        .get_partition_info(&qualified, "20230101")
        .await
        .expect("Failed to get the partition info through the qualified name");
    assert_eq!(other, info);

    let second = dataset
        .get_partition_info("partition_events", "20230102")
        .await
        .expect("Failed to get the second partition info");
    assert_eq!(second.partition_id, "20230102");

    // Missing partition
    let error;
    silent_logs! {
        error = dataset
            .get_partition_info("partition_events", "19991231")
            .await
            .expect_err("A missing partition must not be found");
    }
    assert!(
        matches!(error_kind(&error), Some(BqError::NoRows)),
        "Unexpected error: {error:#}"
    );
}

pub async fn table_info<E: Executor, F: Fixtures>(dataset: &mut Dataset<E>, fixtures: &F) {
    let table = dataset.table("table_info_events");
    fixtures.insert_rows(
        &table,
        vec![event(1, "click"), event(2, "view"), event(3, "view")],
    );
    let info = dataset
        .get_table_info(&table)
        .await
        .expect("Failed to get the table info");
    assert_eq!(info.name, "table_info_events");
    assert_eq!(info.num_rows, 3);
    assert!(info.num_bytes > 0);
    assert!(info.creation_time <= info.last_modified_time);

    // Partitions count into their table
    let partitioned = dataset.table("partition_events$20230101");
    let info = dataset
        .get_table_info(&partitioned)
        .await
        .expect("Failed to get the partitioned table info");
    assert_eq!(info.name, "partition_events");
    assert_eq!(info.num_rows, 3);

    let missing = dataset.table("table_info_missing");
    let error;
    silent_logs! {
        error = dataset
            .get_table_info(&missing)
            .await
            .expect_err("A missing table must not be found");
    }
    assert!(
        matches!(error_kind(&error), Some(BqError::NoRows)),
        "Unexpected error: {error:#}"
    );
}
