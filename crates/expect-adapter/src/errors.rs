use thiserror::Error;

use pagemend_core_types::MendError;

/// Which check produced the failure. A shape precondition, a plain
/// mismatch, and a snapshot difference all surface through the same
/// display shape; callers are expected to treat them identically.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExpectErrorKind {
    Precondition,
    Mismatch,
    Snapshot,
}

/// Enriched assertion failure.
#[derive(Clone, Debug, Error)]
#[error("{}", failure_message(.actual, .matcher, .expected, .detail))]
pub struct ExpectError {
    kind: ExpectErrorKind,
    actual: String,
    matcher: String,
    expected: String,
    detail: String,
}

fn failure_message(actual: &str, matcher: &str, expected: &str, detail: &str) -> String {
    if expected.is_empty() {
        format!("Expectation Failed: Expected {actual} to {matcher}. Error: {detail}")
    } else {
        format!("Expectation Failed: Expected {actual} to {matcher} {expected}. Error: {detail}")
    }
}

impl ExpectError {
    fn new(
        kind: ExpectErrorKind,
        actual: impl Into<String>,
        matcher: impl Into<String>,
        expected: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            actual: actual.into(),
            matcher: matcher.into(),
            expected: expected.into(),
            detail: detail.into(),
        }
    }

    pub(crate) fn mismatch(
        actual: impl Into<String>,
        matcher: impl Into<String>,
        expected: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(ExpectErrorKind::Mismatch, actual, matcher, expected, detail)
    }

    pub(crate) fn precondition(
        actual: impl Into<String>,
        matcher: impl Into<String>,
        expected: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            ExpectErrorKind::Precondition,
            actual,
            matcher,
            expected,
            detail,
        )
    }

    pub(crate) fn snapshot(
        actual: impl Into<String>,
        expected: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            ExpectErrorKind::Snapshot,
            actual,
            "match snapshot",
            expected,
            detail,
        )
    }

    pub fn kind(&self) -> ExpectErrorKind {
        self.kind
    }

    /// The `Error:` segment of the rendered message.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<ExpectError> for MendError {
    fn from(err: ExpectError) -> Self {
        MendError::new(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_enriched_shape() {
        let err = ExpectError::mismatch("\"Log in\"", "have text", "\"Login\"", "text differs");
        assert_eq!(
            err.to_string(),
            "Expectation Failed: Expected \"Log in\" to have text \"Login\". Error: text differs"
        );
        assert_eq!(err.kind(), ExpectErrorKind::Mismatch);
    }

    #[test]
    fn omits_the_expected_segment_when_absent() {
        let err = ExpectError::mismatch("undefined", "be defined", "", "subject is missing");
        assert_eq!(
            err.to_string(),
            "Expectation Failed: Expected undefined to be defined. Error: subject is missing"
        );
    }

    #[test]
    fn preconditions_share_the_display_path() {
        let err = ExpectError::precondition(
            "7",
            "have text",
            "\"Login\"",
            "have text requires a string subject, got int",
        );
        assert!(err.to_string().starts_with("Expectation Failed: Expected 7 to have text"));
        assert_eq!(err.kind(), ExpectErrorKind::Precondition);
    }

    #[test]
    fn converts_into_the_shared_error() {
        let err: MendError =
            ExpectError::mismatch("1", "be", "2", "values differ").into();
        assert_eq!(
            err.to_string(),
            "Expectation Failed: Expected 1 to be 2. Error: values differ"
        );
    }
}
