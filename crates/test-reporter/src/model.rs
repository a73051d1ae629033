use std::fmt;

/// Outcome classification as the host runner reports it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    TimedOut,
}

impl TestStatus {
    pub fn name(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
            TestStatus::TimedOut => "timed_out",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TestStatus::Failed | TestStatus::TimedOut)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One test case as the host runner names it. Consumed read-only.
#[derive(Clone, Debug)]
pub struct TestCase {
    pub title: String,
    /// Suite or file grouping, when the host supplies one.
    pub suite: Option<String>,
}

impl TestCase {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            suite: None,
        }
    }

    pub fn in_suite(title: impl Into<String>, suite: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            suite: Some(suite.into()),
        }
    }

    pub fn full_title(&self) -> String {
        match &self.suite {
            Some(suite) => format!("{suite} > {}", self.title),
            None => self.title.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TestFailure {
    pub message: String,
}

impl TestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Read-only outcome supplied by the host runner. A failed outcome may
/// arrive without a failure payload; the reporter must cope.
#[derive(Clone, Debug)]
pub struct TestOutcome {
    pub status: TestStatus,
    pub duration_ms: u64,
    pub failure: Option<TestFailure>,
}

impl TestOutcome {
    pub fn passed(duration_ms: u64) -> Self {
        Self {
            status: TestStatus::Passed,
            duration_ms,
            failure: None,
        }
    }

    pub fn failed(duration_ms: u64, failure: Option<TestFailure>) -> Self {
        Self {
            status: TestStatus::Failed,
            duration_ms,
            failure,
        }
    }

    pub fn skipped() -> Self {
        Self {
            status: TestStatus::Skipped,
            duration_ms: 0,
            failure: None,
        }
    }

    pub fn timed_out(duration_ms: u64) -> Self {
        Self {
            status: TestStatus::TimedOut,
            duration_ms,
            failure: None,
        }
    }
}
