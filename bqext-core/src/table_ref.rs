use std::fmt::{self, Display};

/// Separator between a table name and its partition qualifier (`events$20230101`).
pub const PARTITION_SEPARATOR: char = '$';

/// Fully qualified reference to a table, possibly to one of its partitions.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub project: String,
    pub dataset: String,
    /// Table name, including the partition qualifier when present.
    pub table: String,
}

impl TableRef {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// Standard SQL spelling: `project.dataset.table`.
    pub fn full_name(&self) -> String {
        let mut result = String::new();
        if !self.project.is_empty() {
            result.push_str(&self.project);
            result.push('.');
        }
        if !self.dataset.is_empty() {
            result.push_str(&self.dataset);
            result.push('.');
        }
        result.push_str(&self.table);
        result
    }

    /// Legacy SQL spelling: `project:dataset.table`.
    pub fn legacy_name(&self) -> String {
        let mut result = String::new();
        if !self.project.is_empty() {
            result.push_str(&self.project);
            result.push(':');
        }
        if !self.dataset.is_empty() {
            result.push_str(&self.dataset);
            result.push('.');
        }
        result.push_str(&self.table);
        result
    }

    pub fn has_partition(&self) -> bool {
        self.table.contains(PARTITION_SEPARATOR)
    }

    /// Table name without the partition qualifier.
    pub fn base_table(&self) -> &str {
        self.table
            .split_once(PARTITION_SEPARATOR)
            .map_or(self.table.as_str(), |(table, _)| table)
    }

    /// Partition qualifier, without the separator.
    pub fn partition(&self) -> Option<&str> {
        self.table
            .split_once(PARTITION_SEPARATOR)
            .map(|(_, partition)| partition)
    }

    /// Same table, without the partition qualifier.
    pub fn without_partition(&self) -> TableRef {
        TableRef::new(&self.project, &self.dataset, self.base_table())
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
