use crate::storage::Storage;
use bqext_core::{JobError, QueryConfig, RowLabeled, TableRef, Value};
use std::sync::Arc;

/// Text of a query paired with the rows it answers with.
///
/// When `failure` is set the rows are followed by that error.
#[derive(Debug, Clone)]
pub struct Script {
    pub pattern: String,
    pub rows: Vec<RowLabeled>,
    pub failure: Option<JobError>,
}

/// Rows produced by a query, possibly followed by a failure.
#[derive(Debug, Default)]
pub(crate) struct Outcome {
    pub(crate) rows: Vec<RowLabeled>,
    pub(crate) failure: Option<JobError>,
}

impl From<Vec<RowLabeled>> for Outcome {
    fn from(rows: Vec<RowLabeled>) -> Self {
        Self {
            rows,
            failure: None,
        }
    }
}

const PARTITIONS_SUMMARY: &str = "$__PARTITIONS_SUMMARY__]";
const TABLES_SUMMARY: &str = ".__TABLES__]";

fn invalid(message: impl Into<String>) -> JobError {
    JobError::new("invalidQuery", message)
}

/// Slice of `text` between the first `start` and the following `end`.
fn between<'a>(text: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let (_, rest) = text.split_once(start)?;
    let (inner, _) = rest.split_once(end)?;
    Some(inner)
}

/// Reverses the escaping of a double quoted legacy string literal.
fn string_literal_after(text: &str, column: &str) -> Option<String> {
    let (_, rest) = text.split_once(&format!("{column} = \""))?;
    let mut result = String::new();
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push(chars.next()?),
            '"' => return Some(result),
            c => result.push(c),
        }
    }
    None
}

fn require_legacy(query: &QueryConfig, what: &str) -> Result<(), JobError> {
    if !query.use_legacy_sql {
        return Err(invalid(format!("{what} is only available in legacy SQL")));
    }
    Ok(())
}

/// Computes the result of `query` against `storage`.
///
/// Only the query shapes produced by the dataset operations are understood,
/// everything not matching a script or one of those shapes is rejected.
pub(crate) fn interpret(
    storage: &Storage,
    scripts: &[Script],
    query: &QueryConfig,
) -> Result<Outcome, JobError> {
    let text = query.text.as_str();
    if let Some(script) = scripts.iter().find(|s| text.contains(&s.pattern)) {
        return Ok(Outcome {
            rows: script.rows.clone(),
            failure: script.failure.clone(),
        });
    }
    if let Some(table) = between(text, "[", PARTITIONS_SUMMARY) {
        require_legacy(query, "__PARTITIONS_SUMMARY__")?;
        let table = query.resolve_table(table);
        let partition = string_literal_after(text, "partition_id")
            .ok_or_else(|| invalid("Expected a filter on partition_id"))?;
        return partition_summary(storage, &table, &partition).map(Into::into);
    }
    if let Some(dataset) = between(text, "[", TABLES_SUMMARY) {
        require_legacy(query, "__TABLES__")?;
        let table_id = string_literal_after(text, "table_id")
            .ok_or_else(|| invalid("Expected a filter on table_id"))?;
        let table = query.resolve_table(&format!("{dataset}.{table_id}"));
        return Ok(table_summary(storage, &table).into());
    }
    if let Some(key) = between(text, "ROW_NUMBER() OVER (PARTITION BY ", ")") {
        if query.use_legacy_sql {
            return Err(invalid("EXCEPT is not available in legacy SQL"));
        }
        let source = between(text, "FROM `", "`")
            .ok_or_else(|| invalid("Expected a backtick quoted source table"))?;
        let table = query.resolve_table(source);
        return dedup(storage, &table, key).map(Into::into);
    }
    if let Some(source) = between(text, "SELECT * FROM `", "`") {
        return storage.rows(&query.resolve_table(source)).map(Into::into);
    }
    Err(invalid(format!(
        "Unsupported query: {}",
        bqext_core::truncate_long!(query.text)
    )))
}

fn partition_summary(
    storage: &Storage,
    table: &TableRef,
    partition: &str,
) -> Result<Vec<RowLabeled>, JobError> {
    if storage.table(table).is_none() {
        return Err(JobError::new(
            "notFound",
            format!("Not found: Table {}", table.legacy_name()),
        )
        .with_location(table.full_name()));
    }
    Ok(storage
        .partition(table, partition)
        .map(|p| {
            RowLabeled::from_iter([
                ("PartitionID", Value::String(Some(partition.to_string()))),
                ("CreationTime", Value::Timestamp(Some(p.creation_time))),
                ("LastModified", Value::Timestamp(Some(p.last_modified))),
            ])
        })
        .into_iter()
        .collect())
}

fn table_summary(storage: &Storage, table: &TableRef) -> Vec<RowLabeled> {
    storage
        .table(table)
        .map(|t| {
            RowLabeled::from_iter([
                ("Name", Value::String(Some(table.base_table().to_string()))),
                ("NumBytes", Value::Int64(Some(t.size_bytes() as i64))),
                ("NumRows", Value::Int64(Some(t.num_rows() as i64))),
                ("CreationTime", Value::Timestamp(Some(t.creation_time))),
                ("LastModifiedTime", Value::Timestamp(Some(t.last_modified()))),
            ])
        })
        .into_iter()
        .collect()
}

/// Keeps the first row of each distinct tuple of `key` columns, in storage order.
fn dedup(storage: &Storage, table: &TableRef, key: &str) -> Result<Vec<RowLabeled>, JobError> {
    let columns: Vec<&str> = key.split(',').map(str::trim).collect();
    let rows = storage.rows(table)?;
    let mut seen: Vec<Vec<Value>> = Vec::new();
    let mut result = Vec::new();
    for row in rows {
        let key = columns
            .iter()
            .map(|c| {
                row.get_column(c)
                    .cloned()
                    .ok_or_else(|| invalid(format!("Unrecognized name: {c}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        result.push(without_row_number(row));
    }
    Ok(result)
}

/// `SELECT * EXCEPT (row_number)` projection.
fn without_row_number(row: RowLabeled) -> RowLabeled {
    if row.get_column("row_number").is_none() {
        return row;
    }
    let (labels, values): (Vec<String>, Vec<Value>) = row
        .labels
        .iter()
        .cloned()
        .zip(row.values.into_vec())
        .filter(|(n, _)| n != "row_number")
        .unzip();
    RowLabeled::new(Arc::from(labels), values.into())
}
