//! Reporter adapter: translates host test-runner lifecycle events into
//! structured, level-tagged log lines that never fail the test they
//! describe, plus a run summary accumulator and once-only subscriber
//! installation.

pub mod init;
pub mod model;
pub mod reporter;
pub mod summary;

pub use init::{init_reporting, init_reporting_with, LogOptions};
pub use model::{TestCase, TestFailure, TestOutcome, TestStatus};
pub use reporter::{default_reporter, Reporter, TracingReporter};
pub use summary::{RunCounts, RunSummary};
