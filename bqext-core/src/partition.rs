use crate::{
    ColumnBinding, Dataset, Executor, FromRow, Model, Result, RowLabeled, TableRef, decode_column,
};
use indoc::formatdoc;
use time::OffsetDateTime;

/// Basic information about a partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionInfo {
    pub partition_id: String,
    pub creation_time: OffsetDateTime,
    pub last_modified: OffsetDateTime,
}

impl Default for PartitionInfo {
    fn default() -> Self {
        Self {
            partition_id: String::new(),
            creation_time: OffsetDateTime::UNIX_EPOCH,
            last_modified: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

impl FromRow for PartitionInfo {
    fn from_row(row: RowLabeled) -> Result<Self> {
        let mut result = Self::default();
        for (name, value) in row.labels.iter().zip(row.values.into_vec()) {
            match name.as_str() {
                "PartitionID" => result.partition_id = decode_column(name, value)?,
                "CreationTime" => result.creation_time = decode_column(name, value)?,
                "LastModified" => result.last_modified = decode_column(name, value)?,
                _ => {}
            }
        }
        Ok(result)
    }
}

impl Model for PartitionInfo {
    fn columns() -> &'static [ColumnBinding] {
        &[
            ColumnBinding {
                field: "partition_id",
                column: "PartitionID",
                ty: "String",
            },
            ColumnBinding {
                field: "creation_time",
                column: "CreationTime",
                ty: "OffsetDateTime",
            },
            ColumnBinding {
                field: "last_modified",
                column: "LastModified",
                ty: "OffsetDateTime",
            },
        ]
    }
}

/// The critical stats of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub num_bytes: i64,
    pub num_rows: u64,
    pub creation_time: OffsetDateTime,
    pub last_modified_time: OffsetDateTime,
}

impl Default for TableInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            num_bytes: 0,
            num_rows: 0,
            creation_time: OffsetDateTime::UNIX_EPOCH,
            last_modified_time: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

impl FromRow for TableInfo {
    fn from_row(row: RowLabeled) -> Result<Self> {
        let mut result = Self::default();
        for (name, value) in row.labels.iter().zip(row.values.into_vec()) {
            match name.as_str() {
                "Name" => result.name = decode_column(name, value)?,
                "NumBytes" => result.num_bytes = decode_column(name, value)?,
                "NumRows" => result.num_rows = decode_column(name, value)?,
                "CreationTime" => result.creation_time = decode_column(name, value)?,
                "LastModifiedTime" => result.last_modified_time = decode_column(name, value)?,
                _ => {}
            }
        }
        Ok(result)
    }
}

/// Escapes `value` for a double quoted legacy SQL string literal.
pub fn legacy_string_literal(value: &str) -> String {
    let mut result = String::with_capacity(value.len() + 2);
    result.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            result.push('\\');
        }
        result.push(c);
    }
    result.push('"');
    result
}

impl<E: Executor> Dataset<E> {
    /// Legacy SQL query over the partition summary of `table`.
    ///
    /// `table` is a legacy table name (`dataset.table` or `project:dataset.table`),
    /// unqualified names resolve against this dataset.
    pub fn partition_info_query(&self, table: &str, partition: &str) -> String {
        // PARTITIONS_SUMMARY is only available in legacy SQL.
        formatdoc! {r#"
            #legacySQL
            SELECT
              partition_id AS PartitionID,
              MSEC_TO_TIMESTAMP(creation_time) AS CreationTime,
              MSEC_TO_TIMESTAMP(last_modified_time) AS LastModified
            FROM
              [{table}$__PARTITIONS_SUMMARY__]
            WHERE partition_id = {partition}"#,
            table = table,
            partition = legacy_string_literal(partition),
        }
    }

    /// Basic information about one partition of `table`.
    ///
    /// A partition that does not exist is reported as [`BqError::NoRows`](crate::BqError::NoRows).
    pub async fn get_partition_info(
        &mut self,
        table: &str,
        partition: &str,
    ) -> Result<PartitionInfo> {
        let query = self.partition_info_query(table, partition);
        self.query_one(query).await
    }

    /// Legacy SQL query over the table summary of the dataset containing `table`.
    pub fn table_info_query(&self, table: &TableRef) -> String {
        let tables = TableRef::new(&table.project, &table.dataset, "__TABLES__");
        formatdoc! {r#"
            #legacySQL
            SELECT
              table_id AS Name,
              size_bytes AS NumBytes,
              row_count AS NumRows,
              MSEC_TO_TIMESTAMP(creation_time) AS CreationTime,
              MSEC_TO_TIMESTAMP(last_modified_time) AS LastModifiedTime
            FROM
              [{tables}]
            WHERE table_id = {table}"#,
            tables = tables.legacy_name(),
            table = legacy_string_literal(table.base_table()),
        }
    }

    /// Size and timestamps of `table`.
    pub async fn get_table_info(&mut self, table: &TableRef) -> Result<TableInfo> {
        let query = self.table_info_query(table);
        self.query_one(query).await
    }
}
