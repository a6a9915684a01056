use derive_setters::Setters;
use std::time::Duration;

#[derive(Debug, Clone, Default, Setters)]
#[setters(prefix = "with_")]
pub struct DispatcherConfig {
    /// Waive the at-most-one-running-job guarantee.
    ///
    /// Off by default. With it on, every effect request starts a worker
    /// immediately and commits race last-committer-wins; the store still
    /// never tears, but result ordering is whatever the scheduler decides.
    pub allow_concurrent_jobs: bool,

    /// Abandon a job that runs longer than this, reported as a failed
    /// effect with the current image left unchanged.
    #[setters(strip_option)]
    pub soft_timeout: Option<Duration>,
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
