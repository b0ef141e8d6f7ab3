use crate::{QueryContext, TableRef, truncate_long};
use std::fmt::{self, Display};

/// Marker opening every legacy SQL query.
pub const LEGACY_SQL_MARKER: &str = "#legacySQL";

/// Policy for the rows already present in a destination table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDisposition {
    /// Add the results to the existing rows.
    Append,
    /// Replace the existing rows.
    Truncate,
    /// Fail unless the destination is empty.
    Empty,
}

/// Fully resolved description of a query, ready to be sent to an [`Executor`](crate::Executor).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfig {
    pub text: String,
    pub dry_run: bool,
    pub use_legacy_sql: bool,
    /// Project of unqualified table names in `text`.
    pub default_project_id: String,
    /// Dataset of unqualified table names in `text`.
    pub default_dataset_id: String,
    pub destination: Option<TableRef>,
    /// `None` leaves the choice to the service, which refuses to write into a non-empty table.
    pub write_disposition: Option<WriteDisposition>,
    pub allow_large_results: bool,
    pub flatten_results: bool,
}

impl QueryConfig {
    /// Query reading its results back, no destination table.
    pub fn result(text: impl Into<String>, dry_run: bool, context: &QueryContext) -> Self {
        let text = text.into();
        Self {
            use_legacy_sql: is_legacy_sql(&text),
            text,
            dry_run,
            default_project_id: context.project_id.clone(),
            default_dataset_id: context.dataset_id.clone(),
            destination: None,
            write_disposition: None,
            allow_large_results: false,
            flatten_results: true,
        }
    }

    /// Query materializing its results into `destination`.
    ///
    /// Without a destination the query is forced to be a dry run.
    pub fn destination(
        text: impl Into<String>,
        destination: Option<TableRef>,
        context: &QueryContext,
    ) -> Self {
        let dry_run = destination.is_none();
        Self {
            destination,
            allow_large_results: true,
            flatten_results: false,
            ..Self::result(text, dry_run, context)
        }
    }

    pub fn with_write_disposition(mut self, write_disposition: WriteDisposition) -> Self {
        self.write_disposition = Some(write_disposition);
        self
    }

    /// Resolves a possibly partial table name (`table`, `dataset.table` or
    /// `project.dataset.table`) against the defaults of this query.
    pub fn resolve_table(&self, name: &str) -> TableRef {
        let name = name.trim_matches('`');
        let mut parts = name.rsplitn(3, ['.', ':']);
        let table = parts.next().unwrap_or_default();
        let dataset = parts.next().unwrap_or(&self.default_dataset_id);
        let project = parts.next().unwrap_or(&self.default_project_id);
        TableRef::new(project, dataset, table)
    }
}

impl Display for QueryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", truncate_long!(self.text))
    }
}

/// Dialect detection is a literal prefix check, nothing else.
pub fn is_legacy_sql(text: &str) -> bool {
    text.starts_with(LEGACY_SQL_MARKER)
}
