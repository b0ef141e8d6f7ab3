use bqext_core::{JobError, RowLabeled, TableRef, Value, WriteDisposition};
use std::collections::{BTreeMap, HashMap};
use time::OffsetDateTime;

/// Partition id of the rows written without a partition qualifier.
pub const UNPARTITIONED: &str = "__UNPARTITIONED__";

#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub rows: Vec<RowLabeled>,
    pub creation_time: OffsetDateTime,
    pub last_modified: OffsetDateTime,
}

impl Partition {
    fn new(now: OffsetDateTime) -> Self {
        Self {
            rows: Vec::new(),
            creation_time: now,
            last_modified: now,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        rows_size(&self.rows)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub partitions: BTreeMap<String, Partition>,
    pub creation_time: OffsetDateTime,
}

impl Table {
    fn new(now: OffsetDateTime) -> Self {
        Self {
            partitions: BTreeMap::new(),
            creation_time: now,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.partitions.values().map(|p| p.rows.len()).sum()
    }

    pub fn size_bytes(&self) -> u64 {
        self.partitions.values().map(Partition::size_bytes).sum()
    }

    pub fn last_modified(&self) -> OffsetDateTime {
        self.partitions
            .values()
            .map(|p| p.last_modified)
            .max()
            .unwrap_or(self.creation_time)
    }
}

/// Storage approximation used for `size_bytes`, close to the billing sizes.
fn value_size(value: &Value) -> u64 {
    match value {
        Value::Null => 0,
        Value::Boolean(..) => 1,
        Value::String(Some(v)) => 2 + v.len() as u64,
        Value::Bytes(Some(v)) => 2 + v.len() as u64,
        Value::Numeric(..) => 16,
        v if v.is_null() => 0,
        _ => 8,
    }
}

pub(crate) fn rows_size(rows: &[RowLabeled]) -> u64 {
    rows.iter()
        .flat_map(|r| r.values().iter())
        .map(value_size)
        .sum()
}

fn partition_id(table: &TableRef) -> &str {
    table.partition().unwrap_or(UNPARTITIONED)
}

/// Tables of the fake service, keyed by their fully qualified name without partition.
#[derive(Debug, Default)]
pub(crate) struct Storage {
    tables: HashMap<TableRef, Table>,
}

impl Storage {
    pub(crate) fn table(&self, table: &TableRef) -> Option<&Table> {
        self.tables.get(&table.without_partition())
    }

    pub(crate) fn partition(&self, table: &TableRef, partition: &str) -> Option<&Partition> {
        self.table(table)?.partitions.get(partition)
    }

    /// Rows of the whole table, or of the partition named by `table`.
    pub(crate) fn rows(&self, table: &TableRef) -> Result<Vec<RowLabeled>, JobError> {
        let not_found = || {
            JobError::new("notFound", format!("Not found: Table {}", table.legacy_name()))
                .with_location(table.full_name())
        };
        let stored = self.table(table).ok_or_else(not_found)?;
        Ok(match table.partition() {
            Some(partition) => stored
                .partitions
                .get(partition)
                .map(|p| p.rows.clone())
                .unwrap_or_default(),
            None => stored
                .partitions
                .values()
                .flat_map(|p| p.rows.iter().cloned())
                .collect(),
        })
    }

    /// Writes `rows` into the partition named by `table`, following `disposition`.
    ///
    /// `None` behaves as [`WriteDisposition::Empty`].
    pub(crate) fn write(
        &mut self,
        table: &TableRef,
        rows: Vec<RowLabeled>,
        disposition: Option<WriteDisposition>,
        now: OffsetDateTime,
    ) -> Result<u64, JobError> {
        let stored = self
            .tables
            .entry(table.without_partition())
            .or_insert_with(|| Table::new(now));
        let partition = stored
            .partitions
            .entry(partition_id(table).to_string())
            .or_insert_with(|| Partition::new(now));
        let written = rows.len() as u64;
        match disposition.unwrap_or(WriteDisposition::Empty) {
            WriteDisposition::Empty if !partition.rows.is_empty() => {
                return Err(JobError::new(
                    "duplicate",
                    format!("Already Exists: Table {}", table.legacy_name()),
                )
                .with_location(table.full_name()));
            }
            WriteDisposition::Empty | WriteDisposition::Append => partition.rows.extend(rows),
            WriteDisposition::Truncate => partition.rows = rows,
        }
        partition.last_modified = now;
        Ok(written)
    }

    pub(crate) fn insert(&mut self, table: &TableRef, rows: Vec<RowLabeled>, now: OffsetDateTime) {
        // Seeding never conflicts.
        let _ = self.write(table, rows, Some(WriteDisposition::Append), now);
    }
}
