#[cfg(test)]
mod tests {
    use bqext_core::{BqError, Error, JobError, JobState, JobStatus, WaitPolicy, error_kind};
    use std::time::Duration;

    #[test]
    fn wait_policy_backoff() {
        let policy = WaitPolicy::default();
        assert_eq!(policy.initial, Duration::from_millis(100));
        let mut delay = policy.initial;
        let mut delays = Vec::new();
        for _ in 0..8 {
            delays.push(delay.as_millis());
            delay = policy.next(delay);
        }
        assert_eq!(delays, [100, 200, 400, 800, 1600, 3200, 5000, 5000]);

        let flat = WaitPolicy {
            multiplier: 0.5,
            ..Default::default()
        };
        assert_eq!(flat.next(flat.initial), flat.initial);
    }

    #[test]
    fn wait_policy_never_spins() {
        let zero = WaitPolicy {
            initial: Duration::ZERO,
            max: Duration::from_millis(8),
            multiplier: 2.0,
        };
        assert_eq!(zero.first(), WaitPolicy::MIN_DELAY);
        assert_eq!(zero.next(Duration::ZERO), WaitPolicy::MIN_DELAY);
        let mut delay = zero.first();
        let mut delays = Vec::new();
        for _ in 0..5 {
            delays.push(delay.as_millis());
            delay = zero.next(delay);
        }
        assert_eq!(delays, [1, 2, 4, 8, 8]);

        let capped = WaitPolicy {
            max: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(capped.first(), WaitPolicy::MIN_DELAY);
        assert_eq!(capped.next(capped.first()), WaitPolicy::MIN_DELAY);
        assert_eq!(WaitPolicy::default().first(), Duration::from_millis(100));
    }

    #[test]
    fn job_status() {
        let mut status = JobStatus::default();
        assert_eq!(status.state, JobState::Pending);
        assert!(!status.done());
        status.state = JobState::Done;
        assert!(status.done());
        assert!(!status.failed());
        let error = JobError::new("duplicate", "Already Exists: Table p:d.t$20230101")
            .with_location("p.d.t$20230101");
        assert_eq!(
            error.to_string(),
            "duplicate: Already Exists: Table p:d.t$20230101 (at p.d.t$20230101)"
        );
        status.error = Some(error.clone());
        assert!(status.failed());
        assert_eq!(status.err(), Some(&error));
    }

    #[test]
    fn error_kind_through_context() {
        let status = JobStatus {
            state: JobState::Done,
            error: Some(JobError::new("invalidQuery", "Syntax error")),
            ..Default::default()
        };
        let error = Error::new(BqError::JobFailure {
            job_id: "job_1".into(),
            status: status.clone(),
        })
        .context("While waiting")
        .context("While removing the duplicates");
        let kind = error_kind(&error).expect("The kind must survive the context");
        assert_eq!(kind.job_status(), Some(&status));
        assert_eq!(kind.to_string(), "Job `job_1` failed: invalidQuery: Syntax error");
        assert!(error_kind(&Error::msg("plain")).is_none());
        assert!(BqError::NoRows.job_status().is_none());
    }
}
