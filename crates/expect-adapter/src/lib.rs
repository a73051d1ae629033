//! Assertion adapter: a fixed matcher surface over tagged actual values,
//! with input-shape preconditions, expected-vs-actual logging, and
//! enriched `Expectation Failed` errors. Matchers evaluate to a soft
//! `Result` for `?` propagation or panic through `hard()` at the host
//! test framework boundary.

pub mod errors;
pub mod expectation;
pub mod snapshot;
pub mod spy;
pub mod subject;

pub use errors::{ExpectError, ExpectErrorKind};
pub use expectation::{expect, Checked, Expectation};
pub use snapshot::{SnapshotFailure, SnapshotOutcome, SnapshotStore};
pub use spy::Spy;
pub use subject::{Subject, SubjectKind};
