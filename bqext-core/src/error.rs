use crate::{Error, JobStatus};

/// Classified failures of the dataset operations.
///
/// They travel inside [`anyhow::Error`] wrapped with context; use
/// [`error_kind`] (or `downcast_ref::<BqError>()`) to recover them.
#[derive(Debug, thiserror::Error)]
pub enum BqError {
    #[error("Invalid query configuration: {reason}")]
    Build { reason: String },

    #[error("The query returned no rows")]
    NoRows,

    #[error("The query returned more than one row")]
    MultipleRows,

    #[error("Column `{column}` holding a {found} value cannot be stored into {target}: {reason}")]
    TypeMismatch {
        column: String,
        target: &'static str,
        found: &'static str,
        reason: String,
    },

    #[error("Destination table `{table}` does not specify a partition")]
    MissingPartitionQualifier { table: String },

    #[error("Job `{job_id}` failed: {}", .status.error.as_ref().map(|e| e.to_string()).unwrap_or_else(|| "unknown error".into()))]
    JobFailure { job_id: String, status: JobStatus },
}

impl BqError {
    pub fn build(reason: impl Into<String>) -> Self {
        BqError::Build {
            reason: reason.into(),
        }
    }

    /// Terminal job status attached to a `JobFailure`.
    pub fn job_status(&self) -> Option<&JobStatus> {
        match self {
            BqError::JobFailure { status, .. } => Some(status),
            _ => None,
        }
    }
}

/// The classified kind of `error`, looking through any context layers.
pub fn error_kind(error: &Error) -> Option<&BqError> {
    error.downcast_ref::<BqError>()
}
