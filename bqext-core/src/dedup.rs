use crate::{BqError, Dataset, Error, Executor, JobStatus, Result, TableRef, WriteDisposition};
use anyhow::Context;
use indoc::formatdoc;

/// Request to rewrite a table keeping one row per distinct key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupRequest {
    /// Source table, relative to the project and dataset of the handle.
    pub source: String,
    /// Column (or columns, comma separated) identifying duplicates.
    pub dedup_key: String,
    /// Replace the destination content instead of requiring it to be empty.
    pub overwrite: bool,
    /// Destination, it must name a partition (`table$YYYYMMDD`).
    pub destination: TableRef,
}

impl DedupRequest {
    pub fn new(
        source: impl Into<String>,
        dedup_key: impl Into<String>,
        overwrite: bool,
        destination: TableRef,
    ) -> Self {
        Self {
            source: source.into(),
            dedup_key: dedup_key.into(),
            overwrite,
            destination,
        }
    }
}

/// Standard SQL query keeping the first row of each `dedup_key` group of `source`.
pub fn dedup_query(source: &str, dedup_key: &str) -> String {
    formatdoc! {r#"
        #standardSQL
        # Delete all duplicate rows based on {dedup_key}
        SELECT * EXCEPT (row_number)
        FROM (
          SELECT *, ROW_NUMBER() OVER (PARTITION BY {dedup_key}) row_number
          FROM `{source}`)
        WHERE row_number = 1"#,
        dedup_key = dedup_key,
        source = source,
    }
}

impl<E: Executor> Dataset<E> {
    /// Removes the duplicates of `request.source` writing the result into
    /// `request.destination`, waiting for the job to finish.
    ///
    /// The destination must carry a partition qualifier, a plain table name
    /// would target the live partition of the day. Without `overwrite` the
    /// service refuses to write into a non-empty partition and that failure
    /// is returned as [`BqError::JobFailure`] with the terminal status.
    pub async fn dedup(&mut self, request: &DedupRequest) -> Result<JobStatus> {
        if !request.destination.has_partition() {
            let error = Error::new(BqError::MissingPartitionQualifier {
                table: request.destination.table.clone(),
            });
            log::error!("{:#}", error);
            return Err(error);
        }
        let text = dedup_query(&request.source, &request.dedup_key);
        let mut query = self.destination_query(text, Some(request.destination.clone()));
        if request.overwrite {
            query = query.with_write_disposition(WriteDisposition::Truncate);
        }
        log::info!(
            "Removing dups (of {}) and writing to {}",
            request.dedup_key,
            request.destination
        );
        let executor = self.executor_mut();
        let job = executor.submit(query).await.with_context(|| {
            format!(
                "While submitting the dedup of `{}` into `{}`",
                request.source, request.destination
            )
        })?;
        log::info!("JobID: {}", job);
        executor.wait(&job).await
    }
}
