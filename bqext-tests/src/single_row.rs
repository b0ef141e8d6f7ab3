use crate::{Fixtures, silent_logs};
use bqext::{BqError, Dataset, Executor, Model, RowLabeled, Value, error_kind};
use std::collections::BTreeMap;

#[derive(Model, Default, Debug, Clone, PartialEq)]
#[bq(rename_all = "PascalCase")]
struct Trade {
    trade_id: i64,
    symbol: String,
    price: f64,
    #[bq(name = "qty")]
    quantity: Option<i32>,
    #[bq(skip)]
    note: String,
}

fn trade_row(trade_id: i64, symbol: Value, price: Value, quantity: Value) -> RowLabeled {
    RowLabeled::from_iter([
        ("TradeId", Value::from(trade_id)),
        ("Symbol", symbol),
        ("Price", price),
        ("qty", quantity),
        ("Venue", Value::from("XNAS")),
    ])
}

fn select_all<E: Executor>(dataset: &Dataset<E>, table: &str) -> String {
    format!("SELECT * FROM `{}`", dataset.table(table).full_name())
}

pub async fn single_row<E: Executor, F: Fixtures>(dataset: &mut Dataset<E>, fixtures: &F) {
    let table = dataset.table("single_row_trade");
    fixtures.insert_rows(
        &table,
        vec![trade_row(
            7,
            "NVDA".into(),
            Value::from(487.25),
            Value::from(12_i64),
        )],
    );
    let query = select_all(dataset, "single_row_trade");

    // Model
    let trade: Trade = dataset
        .query_one(&query)
        .await
        .expect("Failed to query the single trade");
    assert_eq!(
        trade,
        Trade {
            trade_id: 7,
            symbol: "NVDA".into(),
            price: 487.25,
            quantity: Some(12),
            note: String::new(),
        }
    );

    // Same row, same result
    let again: Trade = dataset
        .query_one(&query)
        .await
        .expect("Failed to query the single trade again");
    assert_eq!(again, trade);

    // Into an existing value
    let mut target = Trade {
        note: "kept".into(),
        ..Default::default()
    };
    dataset
        .query_and_parse(&query, &mut target)
        .await
        .expect("Failed to parse the single trade");
    assert_eq!(target, trade);

    // Generic containers
    let row: BTreeMap<String, Value> = dataset
        .query_one(&query)
        .await
        .expect("Failed to query the single trade as a map");
    assert_eq!(row.len(), 5);
    assert_eq!(row.get("Venue"), Some(&Value::from("XNAS")));
    let row: RowLabeled = dataset
        .query_one(&query)
        .await
        .expect("Failed to query the single trade as a row");
    assert_eq!(row.get_column("TradeId"), Some(&Value::from(7_i64)));
    assert_eq!(row.get_column("tradeid"), None);

    // Null into optional
    let table = dataset.table("single_row_no_quantity");
    fixtures.insert_rows(
        &table,
        vec![trade_row(8, "AMD".into(), Value::from(160.5), Value::Null)],
    );
    let query = select_all(dataset, "single_row_no_quantity");
    let trade: Trade = dataset
        .query_one(&query)
        .await
        .expect("Failed to query the trade without quantity");
    assert_eq!(trade.trade_id, 8);
    assert_eq!(trade.quantity, None);
}

pub async fn single_row_errors<E: Executor, F: Fixtures>(dataset: &mut Dataset<E>, fixtures: &F) {
    // No rows
    fixtures.insert_rows(&dataset.table("single_row_empty"), vec![]);
    let query = select_all(dataset, "single_row_empty");
    let error;
    silent_logs! {
        error = dataset
            .query_one::<Trade>(&query)
            .await
            .expect_err("An empty result must not decode");
    }
    assert!(
        matches!(error_kind(&error), Some(BqError::NoRows)),
        "Unexpected error: {error:#}"
    );
    let prior = Trade {
        trade_id: 42,
        symbol: "ORCL".into(),
        note: "kept".into(),
        ..Default::default()
    };
    let mut target = prior.clone();
    let error;
    silent_logs! {
        error = dataset
            .query_and_parse(&query, &mut target)
            .await
            .expect_err("An empty result must not be parsed");
    }
    assert!(
        matches!(error_kind(&error), Some(BqError::NoRows)),
        "Unexpected error: {error:#}"
    );
    assert_eq!(target, prior);
    let mut row = BTreeMap::from([("Venue".to_string(), Value::from("XLON"))]);
    silent_logs! {
        assert!(dataset.query_and_parse(&query, &mut row).await.is_err());
    }
    assert_eq!(row.get("Venue"), Some(&Value::from("XLON")));

    // Multiple rows
    fixtures.insert_rows(
        &dataset.table("single_row_many"),
        vec![
            trade_row(1, "AAPL".into(), Value::from(190.0), Value::from(1_i64)),
            trade_row(2, "MSFT".into(), Value::from(410.0), Value::from(2_i64)),
        ],
    );
    let query = select_all(dataset, "single_row_many");
    let mut target = Trade::default();
    let error;
    silent_logs! {
        error = dataset
            .query_and_parse(&query, &mut target)
            .await
            .expect_err("Two rows must not decode as one");
    }
    assert!(
        matches!(error_kind(&error), Some(BqError::MultipleRows)),
        "Unexpected error: {error:#}"
    );
    assert_eq!(target, Trade::default());

    // Incompatible type
    fixtures.insert_rows(
        &dataset.table("single_row_mismatch"),
        vec![trade_row(
            3,
            "TSLA".into(),
            "expensive".into(),
            Value::from(3_i64),
        )],
    );
    let query = select_all(dataset, "single_row_mismatch");
    let mut target = Trade {
        trade_id: 99,
        ..Default::default()
    };
    let error;
    silent_logs! {
        error = dataset
            .query_and_parse(&query, &mut target)
            .await
            .expect_err("A string must not decode into a float");
    }
    let Some(BqError::TypeMismatch { column, found, .. }) = error_kind(&error) else {
        panic!("Unexpected error: {error:#}");
    };
    assert_eq!(column, "Price");
    assert_eq!(*found, "STRING");
    assert_eq!(target.trade_id, 99);

    // Null into a required field
    fixtures.insert_rows(
        &dataset.table("single_row_null_symbol"),
        vec![trade_row(
            4,
            Value::String(None),
            Value::from(1.5),
            Value::Null,
        )],
    );
    let query = select_all(dataset, "single_row_null_symbol");
    let error;
    silent_logs! {
        error = dataset
            .query_one::<Trade>(&query)
            .await
            .expect_err("A null must not decode into a String");
    }
    let Some(BqError::TypeMismatch { column, .. }) = error_kind(&error) else {
        panic!("Unexpected error: {error:#}");
    };
    assert_eq!(column, "Symbol");
}
