use crate::{Fixtures, silent_logs};
use bqext::{AsValue, BqError, Dataset, DedupRequest, Executor, RowLabeled, Value, error_kind};

fn reading(sensor: &'static str, day: i64, celsius: f64) -> RowLabeled {
    RowLabeled::from_iter([
        ("sensor", Value::from(sensor)),
        ("day", Value::from(day)),
        ("celsius", Value::from(celsius)),
    ])
}

fn sensors(rows: &[RowLabeled]) -> Vec<String> {
    let mut result: Vec<String> = rows
        .iter()
        .map(|row| {
            let value = row.get_column("sensor").cloned().unwrap_or_default();
            String::try_from_value(value).expect("The sensor column must be a string")
        })
        .collect();
    result.sort();
    result
}

pub async fn dedup<E: Executor, F: Fixtures>(dataset: &mut Dataset<E>, fixtures: &F) {
    let source = dataset.table("dedup_readings");
    fixtures.insert_rows(
        &source,
        vec![
            reading("north", 1, 12.5),
            reading("north", 1, 12.5),
            reading("south", 1, 18.0),
            reading("east", 1, 15.25),
            reading("east", 2, 15.25),
            reading("east", 2, 16.0),
        ],
    );
    let destination = dataset.table("dedup_readings_clean$20230101");

    let status = dataset
        .dedup(&DedupRequest::new(
            "dedup_readings",
            "sensor",
            true,
            destination.clone(),
        ))
        .await
        .expect("Failed to remove the duplicates");
    assert!(status.done());
    assert!(status.err().is_none());
    let rows = fixtures.table_rows(&destination);
    assert_eq!(sensors(&rows), ["east", "north", "south"]);
    assert!(rows.iter().all(|r| r.get_column("row_number").is_none()));
    assert!(rows.iter().all(|r| r.len() == 3));

    // Overwriting again gives the same content
    dataset
        .dedup(&DedupRequest::new(
            "dedup_readings",
            "sensor",
            true,
            destination.clone(),
        ))
        .await
        .expect("Failed to remove the duplicates a second time");
    assert_eq!(sensors(&fixtures.table_rows(&destination)), ["east", "north", "south"]);

    // Without overwrite the partition must be empty
    let error;
    silent_logs! {
        error = dataset
            .dedup(&DedupRequest::new(
                "dedup_readings",
                "sensor",
                false,
                destination.clone(),
            ))
            .await
            .expect_err("Writing into a non empty partition must fail");
    }
    let Some(BqError::JobFailure { status, .. }) = error_kind(&error) else {
        panic!("Unexpected error: {error:#}");
    };
    assert!(status.failed());
    assert_eq!(fixtures.table_rows(&destination).len(), 3);

    // Composite key into a fresh partition
    let destination = dataset.table("dedup_readings_clean$20230102");
    let status = dataset
        .dedup(&DedupRequest::new(
            "dedup_readings",
            "sensor, day",
            false,
            destination.clone(),
        ))
        .await
        .expect("Failed to remove the duplicates by sensor and day");
    assert!(status.done());
    assert_eq!(
        sensors(&fixtures.table_rows(&destination)),
        ["east", "east", "north", "south"]
    );
    assert_eq!(fixtures.table_rows(&source).len(), 6);
}

pub async fn dedup_requires_partition<E: Executor, F: Fixtures>(
    dataset: &mut Dataset<E>,
    fixtures: &F,
) {
    let destination = dataset.table("dedup_readings_live");
    let error;
    silent_logs! {
        error = dataset
            .dedup(&DedupRequest::new(
                "dedup_readings",
                "sensor",
                true,
                destination.clone(),
            ))
            .await
            .expect_err("A destination without partition must be refused");
    }
    let Some(BqError::MissingPartitionQualifier { table }) = error_kind(&error) else {
        panic!("Unexpected error: {error:#}");
    };
    assert_eq!(table, "dedup_readings_live");
    assert!(fixtures.table_rows(&destination).is_empty());
}
