use thiserror::Error;

use pagemend_core_types::{AttemptRecord, MendError};

/// Failures a `PagePort` implementation reports for a single attempt.
/// Recorded and suppressed inside the chain; only surfaced through
/// `ChainError::Exhausted` (or `Attempt` for strategy-less calls).
#[derive(Clone, Debug, Error)]
pub enum PortError {
    #[error("no element matches {selector}")]
    NotFound { selector: String },
    #[error("timed out after {ms}ms waiting for {selector}")]
    Timeout { selector: String, ms: u64 },
    #[error("element {selector} not interactable: {reason}")]
    NotInteractable { selector: String, reason: String },
    #[error("driver error: {0}")]
    Io(String),
}

#[derive(Clone, Debug, Error)]
pub enum ChainError {
    #[error("action chain disabled by policy")]
    Disabled,
    #[error("operation cancelled")]
    Cancelled,
    #[error("context deadline exceeded before '{element}' resolved")]
    DeadlineExceeded { element: String },
    #[error("{strategy} failed: {source}")]
    Attempt {
        strategy: String,
        #[source]
        source: PortError,
    },
    #[error("{}", exhausted_message(.element, .attempts))]
    Exhausted {
        element: String,
        attempts: Vec<AttemptRecord>,
    },
}

/// One line per attempt, in original rank order, each carrying the
/// strategy label (with selector) and the underlying reason.
fn exhausted_message(element: &str, attempts: &[AttemptRecord]) -> String {
    let mut message = format!(
        "all {} locator strategies failed for '{}':",
        attempts.len(),
        element
    );
    for attempt in attempts {
        message.push_str("\n  ");
        message.push_str(&attempt.to_string());
    }
    message
}

impl From<ChainError> for MendError {
    fn from(err: ChainError) -> Self {
        MendError::new(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read chain policy: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse chain policy: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_lists_every_attempt_in_rank_order() {
        let err = ChainError::Exhausted {
            element: "login button".into(),
            attempts: vec![
                AttemptRecord::new(0, "id:#login", "no element matches #login"),
                AttemptRecord::new(1, "css:[name=login]", "timed out after 5000ms"),
                AttemptRecord::new(2, "text:Login", "no element matches Login"),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.starts_with("all 3 locator strategies failed for 'login button':"));
        let first = rendered.find("id:#login").unwrap();
        let second = rendered.find("css:[name=login]").unwrap();
        let third = rendered.find("text:Login").unwrap();
        assert!(first < second && second < third);
        assert!(rendered.contains("timed out after 5000ms"));
    }

    #[test]
    fn chain_error_converts_into_shared_error() {
        let err: MendError = ChainError::Disabled.into();
        assert_eq!(err.to_string(), "action chain disabled by policy");
    }

    #[test]
    fn attempt_names_the_call_and_the_cause() {
        let err = ChainError::Attempt {
            strategy: "page_title".into(),
            source: PortError::Io("session closed".into()),
        };
        assert_eq!(err.to_string(), "page_title failed: driver error: session closed");
    }
}
