use crate::{
    FakeDriver, Script,
    interpret::{Outcome, interpret},
    storage::{Storage, rows_size},
};
use async_stream::try_stream;
use bqext_core::{
    Connection, Context, Error, Executor, Job, JobError, JobState, JobStatistics, JobStatus,
    QueryConfig, QueryContext, Result, RowLabeled, TableRef, WaitPolicy, expect_scheme,
    stream::{Stream, TryStreamExt},
    truncate_long,
};
use std::{
    borrow::Cow,
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use time::OffsetDateTime;

/// A call received by the fake service.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Read(QueryConfig),
    Submit(QueryConfig),
    Status(Job),
}

#[derive(Debug)]
struct FakeJob {
    status: JobStatus,
    /// Status polls still answering `Running`.
    polls_left: usize,
}

#[derive(Debug, Default)]
struct State {
    storage: Storage,
    scripts: Vec<Script>,
    requests: Vec<Request>,
    jobs: HashMap<String, FakeJob>,
    next_job: u64,
    rows_read: usize,
    job_latency: usize,
}

/// Timestamps are kept at millisecond precision, like the partition summaries report them.
fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(now.nanosecond() / 1_000_000 * 1_000_000)
        .unwrap_or(now)
}

fn job_error(error: JobError) -> Error {
    Error::msg(error.to_string())
}

impl State {
    fn read(&mut self, query: QueryConfig) -> std::result::Result<Outcome, JobError> {
        let outcome = interpret(&self.storage, &self.scripts, &query);
        let dry_run = query.dry_run;
        self.requests.push(Request::Read(query));
        let outcome = outcome?;
        if dry_run {
            return Ok(Outcome::default());
        }
        Ok(outcome)
    }

    fn run(
        &mut self,
        query: &QueryConfig,
        statistics: &mut JobStatistics,
    ) -> std::result::Result<(), JobError> {
        let Outcome { rows, failure } = interpret(&self.storage, &self.scripts, query)?;
        if let Some(failure) = failure {
            return Err(failure);
        }
        statistics.total_bytes_processed = rows_size(&rows);
        if query.dry_run {
            return Ok(());
        }
        if let Some(destination) = &query.destination {
            let destination = query.resolve_table(&destination.full_name());
            statistics.rows_written = self.storage.write(
                &destination,
                rows,
                query.write_disposition,
                now(),
            )?;
        }
        Ok(())
    }

    fn submit(&mut self, query: QueryConfig) -> Job {
        self.next_job += 1;
        let job = Job::new(format!("fake_job_{:04}", self.next_job));
        let started = now();
        let mut status = JobStatus {
            state: JobState::Done,
            statistics: JobStatistics {
                creation_time: Some(started),
                start_time: Some(started),
                ..Default::default()
            },
            ..Default::default()
        };
        if let Err(e) = self.run(&query, &mut status.statistics) {
            log::debug!("Fake job {} failed: {}", job, e);
            status.errors.push(e.clone());
            status.error = Some(e);
        }
        status.statistics.end_time = Some(now());
        self.requests.push(Request::Submit(query));
        self.jobs.insert(
            job.id.clone(),
            FakeJob {
                status,
                polls_left: self.job_latency,
            },
        );
        job
    }

    fn status(&mut self, job: &Job) -> Result<JobStatus> {
        self.requests.push(Request::Status(job.clone()));
        let Some(fake) = self.jobs.get_mut(&job.id) else {
            let error = Error::msg(format!("Not found: Job {}", job));
            log::error!("{:#}", error);
            return Err(error);
        };
        if fake.polls_left > 0 {
            fake.polls_left -= 1;
            return Ok(JobStatus {
                state: JobState::Running,
                error: None,
                errors: Vec::new(),
                statistics: JobStatistics {
                    end_time: None,
                    ..fake.status.statistics.clone()
                },
            });
        }
        Ok(fake.status.clone())
    }
}

/// Handle to an in memory query service.
///
/// Clones share the same service, a test can keep one to seed and inspect
/// the tables while a dataset handle owns another.
#[derive(Debug, Clone)]
pub struct FakeConnection {
    state: Arc<Mutex<State>>,
    wait_policy: WaitPolicy,
}

impl Default for FakeConnection {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FakeConnection {
    pub fn new() -> Self {
        Self {
            state: Default::default(),
            wait_policy: WaitPolicy {
                initial: Duration::from_millis(1),
                max: Duration::from_millis(10),
                multiplier: 2.0,
            },
        }
    }

    pub fn with_wait_policy(mut self, wait_policy: WaitPolicy) -> Self {
        self.wait_policy = wait_policy;
        self
    }

    /// Number of status polls answering `Running` before a job reports its outcome.
    pub fn with_job_latency(self, polls: usize) -> Self {
        lock(&self.state).job_latency = polls;
        self
    }

    /// Appends `rows` to `table`, into its partition when `table` names one.
    pub fn insert_rows(&self, table: &TableRef, rows: impl IntoIterator<Item = RowLabeled>) {
        lock(&self.state)
            .storage
            .insert(table, rows.into_iter().collect(), now());
    }

    /// Rows stored in `table` (or in its partition), empty when it does not exist.
    pub fn table_rows(&self, table: &TableRef) -> Vec<RowLabeled> {
        lock(&self.state).storage.rows(table).unwrap_or_default()
    }

    pub fn has_table(&self, table: &TableRef) -> bool {
        let state = lock(&self.state);
        match table.partition() {
            Some(partition) => state.storage.partition(table, partition).is_some(),
            None => state.storage.table(table).is_some(),
        }
    }

    /// Answers every query containing `pattern` with `rows`.
    pub fn script(&self, pattern: impl Into<String>, rows: impl IntoIterator<Item = RowLabeled>) {
        lock(&self.state).scripts.push(Script {
            pattern: pattern.into(),
            rows: rows.into_iter().collect(),
            failure: None,
        });
    }

    /// Answers every query containing `pattern` with `rows` followed by `failure`.
    pub fn script_failure(
        &self,
        pattern: impl Into<String>,
        rows: impl IntoIterator<Item = RowLabeled>,
        failure: JobError,
    ) {
        lock(&self.state).scripts.push(Script {
            pattern: pattern.into(),
            rows: rows.into_iter().collect(),
            failure: Some(failure),
        });
    }

    pub fn requests(&self) -> Vec<Request> {
        lock(&self.state).requests.clone()
    }

    /// Queries submitted as jobs, in order.
    pub fn submitted(&self) -> Vec<QueryConfig> {
        lock(&self.state)
            .requests
            .iter()
            .filter_map(|r| match r {
                Request::Submit(query) => Some(query.clone()),
                _ => None,
            })
            .collect()
    }

    /// Rows handed out by every `read` so far.
    pub fn rows_read(&self) -> usize {
        lock(&self.state).rows_read
    }
}

impl Executor for FakeConnection {
    type Driver = FakeDriver;

    fn driver(&self) -> &Self::Driver {
        &FakeDriver {}
    }

    fn wait_policy(&self) -> WaitPolicy {
        self.wait_policy
    }

    fn read(&mut self, query: QueryConfig) -> impl Stream<Item = Result<RowLabeled>> + Send {
        let state = self.state.clone();
        let context = Arc::new(format!("While fetching the query:\n{}", truncate_long!(query.text)));
        try_stream! {
            let outcome = lock(&state).read(query);
            let Outcome { rows, failure } = outcome.map_err(job_error)?;
            for row in rows {
                lock(&state).rows_read += 1;
                yield row;
            }
            if let Some(failure) = failure {
                Err::<(), _>(job_error(failure))?;
            }
        }
        .map_err(move |e: Error| {
            let e = e.context(context.clone());
            log::error!("{:#}", e);
            e
        })
    }

    fn submit(&mut self, query: QueryConfig) -> impl Future<Output = Result<Job>> + Send {
        let state = self.state.clone();
        async move {
            let job = lock(&state).submit(query);
            log::debug!("Fake job {} submitted", job);
            Ok(job)
        }
    }

    fn status(&mut self, job: &Job) -> impl Future<Output = Result<JobStatus>> + Send {
        let state = self.state.clone();
        let job = job.clone();
        async move { lock(&state).status(&job) }
    }
}

impl Connection for FakeConnection {
    #[allow(refining_impl_trait)]
    async fn connect(url: Cow<'static, str>) -> Result<FakeConnection> {
        let context = || format!("While trying to connect to `{}`", url);
        expect_scheme::<FakeDriver>(&url).with_context(context)?;
        QueryContext::from_url(&url).with_context(context)?;
        Ok(FakeConnection::new())
    }
}
