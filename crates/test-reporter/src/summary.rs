use std::time::Instant;

use parking_lot::Mutex;

use crate::model::TestStatus;

/// Counters for one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub timed_out: usize,
}

impl RunCounts {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.timed_out
    }
}

/// Accumulates outcomes across one run; rendered as a single
/// `Test Results:` line at the end.
#[derive(Debug)]
pub struct RunSummary {
    counts: Mutex<RunCounts>,
    started: Instant,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(RunCounts::default()),
            started: Instant::now(),
        }
    }

    pub fn record(&self, status: TestStatus) {
        let mut counts = self.counts.lock();
        match status {
            TestStatus::Passed => counts.passed += 1,
            TestStatus::Failed => counts.failed += 1,
            TestStatus::Skipped => counts.skipped += 1,
            TestStatus::TimedOut => counts.timed_out += 1,
        }
    }

    pub fn counts(&self) -> RunCounts {
        *self.counts.lock()
    }

    /// Timeouts count as failures in the aggregate line.
    pub fn render(&self) -> String {
        let counts = self.counts();
        format!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            counts.passed,
            counts.failed + counts.timed_out,
            counts.skipped,
            self.started.elapsed().as_millis()
        )
    }
}
