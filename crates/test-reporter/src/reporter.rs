use once_cell::sync::OnceCell;
use tracing::{error, info};

use pagemend_core_types::MendError;

use crate::model::{TestCase, TestOutcome, TestStatus};
use crate::summary::{RunCounts, RunSummary};

/// Host-runner lifecycle hooks.
///
/// Implementations must swallow sink failures; a broken log sink never
/// fails the test it describes.
pub trait Reporter: Send + Sync {
    fn on_test_begin(&self, case: &TestCase);
    fn on_test_end(&self, case: &TestCase, outcome: &TestOutcome);
    fn on_error(&self, error: &MendError);
}

/// `tracing`-backed reporter: an info line per test start, a `✓`/`✗`
/// line per outcome, and a run summary line at `finish()`.
#[derive(Debug, Default)]
pub struct TracingReporter {
    summary: RunSummary,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Logs the aggregate `Test Results:` line and returns the counts.
    pub fn finish(&self) -> RunCounts {
        info!("{}", self.summary.render());
        self.summary.counts()
    }
}

impl Reporter for TracingReporter {
    fn on_test_begin(&self, case: &TestCase) {
        info!("Running test: {}", case.full_title());
    }

    fn on_test_end(&self, case: &TestCase, outcome: &TestOutcome) {
        self.summary.record(outcome.status);
        let title = case.full_title();
        match outcome.status {
            TestStatus::Passed => info!("✓ {} ({} ms)", title, outcome.duration_ms),
            TestStatus::Skipped => info!("- {} (skipped)", title),
            TestStatus::Failed | TestStatus::TimedOut => match &outcome.failure {
                Some(failure) => error!("✗ {} - {}", title, failure.message),
                None if outcome.status == TestStatus::TimedOut => {
                    error!("✗ {} - timed out ({} ms)", title, outcome.duration_ms)
                }
                None => error!("✗ {}", title),
            },
        }
    }

    fn on_error(&self, error: &MendError) {
        error!("{error}");
    }
}

static DEFAULT: OnceCell<TracingReporter> = OnceCell::new();

/// Process-wide reporter for convenience callers. Explicit construction
/// and injection remain the primary path; this exists for call sites
/// with no way to thread a reporter through.
pub fn default_reporter() -> &'static TracingReporter {
    DEFAULT.get_or_init(TracingReporter::new)
}
