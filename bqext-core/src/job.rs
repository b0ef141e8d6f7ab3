use std::{
    fmt::{self, Display},
    time::Duration,
};
use time::OffsetDateTime;

/// Handle of a job submitted to the query service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Job {
    pub id: String,
}

impl Job {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    #[default]
    Pending,
    Running,
    Done,
}

/// Error reported by the service for a job.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct JobError {
    /// Short machine readable reason, e.g. `duplicate` or `invalidQuery`.
    pub reason: String,
    pub message: String,
    /// Where the error happened, if known (for example a table name).
    pub location: String,
}

impl JobError {
    pub fn new(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            message: message.into(),
            location: String::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

impl Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.reason, self.message)?;
        if !self.location.is_empty() {
            write!(f, " (at {})", self.location)?;
        }
        Ok(())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct JobStatistics {
    pub creation_time: Option<OffsetDateTime>,
    pub start_time: Option<OffsetDateTime>,
    pub end_time: Option<OffsetDateTime>,
    pub total_bytes_processed: u64,
    /// Rows written into the destination table, if any.
    pub rows_written: u64,
}

/// Current state of a job.
///
/// `error` is the error that made a done job fail, `errors` holds every
/// error reported while running, which may be non empty even on success.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub state: JobState,
    pub error: Option<JobError>,
    pub errors: Vec<JobError>,
    pub statistics: JobStatistics,
}

impl JobStatus {
    pub fn done(&self) -> bool {
        self.state == JobState::Done
    }

    /// The final error of a done job.
    pub fn err(&self) -> Option<&JobError> {
        self.error.as_ref()
    }

    pub fn failed(&self) -> bool {
        self.done() && self.error.is_some()
    }
}

/// Backoff used while waiting for a job to reach a terminal state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitPolicy {
    pub initial: Duration,
    pub max: Duration,
    pub multiplier: f64,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(100),
            max: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl WaitPolicy {
    /// Shortest delay between two status polls.
    pub const MIN_DELAY: Duration = Duration::from_millis(1);

    /// Delay before the second status poll.
    pub fn first(&self) -> Duration {
        self.initial.min(self.max).max(Self::MIN_DELAY)
    }

    /// Delay following `current`.
    pub fn next(&self, current: Duration) -> Duration {
        current
            .mul_f64(self.multiplier.max(1.0))
            .min(self.max)
            .max(Self::MIN_DELAY)
    }
}
