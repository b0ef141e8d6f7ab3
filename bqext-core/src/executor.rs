use crate::{
    BqError, Driver, Error, Job, JobStatus, QueryConfig, Result, RowLabeled, WaitPolicy,
    stream::Stream,
};
use anyhow::Context;
use std::future::Future;

/// The query service seam.
///
/// Implementations own the transport; everything above this trait only
/// builds [`QueryConfig`] values and interprets rows and job statuses.
pub trait Executor: Send + Sized {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Backoff used by [`Executor::wait`].
    fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::default()
    }

    /// Runs the query and returns its rows.
    ///
    /// The stream is lazy, forward only and cannot be restarted. Its end means
    /// there are no more rows, any failure is yielded as an `Err` item.
    fn read(&mut self, query: QueryConfig) -> impl Stream<Item = Result<RowLabeled>> + Send;

    /// Submits the query as a job without waiting for it.
    fn submit(&mut self, query: QueryConfig) -> impl Future<Output = Result<Job>> + Send;

    /// Current status of a submitted job.
    fn status(&mut self, job: &Job) -> impl Future<Output = Result<JobStatus>> + Send;

    /// Waits until the job reaches a terminal state.
    ///
    /// A job that ends with an error is reported as [`BqError::JobFailure`],
    /// carrying the terminal status. Dropping the returned future stops the
    /// waiting, the job itself keeps running on the service.
    fn wait(&mut self, job: &Job) -> impl Future<Output = Result<JobStatus>> + Send {
        async move {
            let policy = self.wait_policy();
            let mut delay = policy.first();
            loop {
                let status = self
                    .status(job)
                    .await
                    .with_context(|| format!("While waiting for the job `{job}`"))?;
                if status.done() {
                    if status.error.is_some() {
                        let error = Error::new(BqError::JobFailure {
                            job_id: job.id.clone(),
                            status,
                        });
                        log::error!("{:#}", error);
                        return Err(error);
                    }
                    return Ok(status);
                }
                tokio::time::sleep(delay).await;
                delay = policy.next(delay);
            }
        }
    }
}
