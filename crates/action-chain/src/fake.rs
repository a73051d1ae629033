use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use pagemend_core_types::LocatorStrategy;

use crate::errors::PortError;
use crate::ports::PagePort;

/// One element the fake page knows about, keyed by the selector that
/// reaches it.
#[derive(Clone, Debug, Default)]
pub struct FakeElement {
    pub text: String,
    pub value: String,
}

/// Every port call the fake page saw, in arrival order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FakeCall {
    pub action: &'static str,
    pub strategy: String,
    pub payload: Option<String>,
    pub timeout_ms: u64,
}

/// In-memory `PagePort` for tests. Selectors either resolve to scripted
/// elements or fail with a scripted error; unknown selectors fail with
/// `NotFound`. Every call is recorded so tests can assert which
/// strategies were attempted, with which payloads and timeouts.
#[derive(Default)]
pub struct FakePage {
    elements: DashMap<String, FakeElement>,
    failures: DashMap<String, PortError>,
    title: RwLock<String>,
    log: Mutex<Vec<FakeCall>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        *self.title.write() = title.into();
    }

    /// Registers a resolvable element under `selector`.
    pub fn add_element(&self, selector: impl Into<String>, text: impl Into<String>) {
        self.elements.insert(
            selector.into(),
            FakeElement {
                text: text.into(),
                value: String::new(),
            },
        );
    }

    /// Scripts `selector` to fail with `error` instead of resolving.
    pub fn fail_with(&self, selector: impl Into<String>, error: PortError) {
        self.failures.insert(selector.into(), error);
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.log.lock().clone()
    }

    /// Selectors attempted so far, in arrival order.
    pub fn attempted_selectors(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .map(|call| call.strategy.clone())
            .collect()
    }

    /// The value last filled into the element under `selector`.
    pub fn value_of(&self, selector: &str) -> Option<String> {
        self.elements.get(selector).map(|el| el.value.clone())
    }

    fn record(
        &self,
        action: &'static str,
        strategy: &LocatorStrategy,
        payload: Option<&str>,
        timeout: Duration,
    ) {
        self.log.lock().push(FakeCall {
            action,
            strategy: strategy.to_string(),
            payload: payload.map(str::to_string),
            timeout_ms: timeout.as_millis() as u64,
        });
    }

    fn resolve(&self, strategy: &LocatorStrategy) -> Result<(), PortError> {
        if let Some(err) = self.failures.get(strategy.selector()) {
            return Err(err.clone());
        }
        if self.elements.contains_key(strategy.selector()) {
            Ok(())
        } else {
            Err(PortError::NotFound {
                selector: strategy.selector().to_string(),
            })
        }
    }
}

#[async_trait]
impl PagePort for FakePage {
    async fn fill(
        &self,
        strategy: &LocatorStrategy,
        text: &str,
        timeout: Duration,
    ) -> Result<(), PortError> {
        self.record("fill", strategy, Some(text), timeout);
        self.resolve(strategy)?;
        if let Some(mut element) = self.elements.get_mut(strategy.selector()) {
            element.value = text.to_string();
        }
        Ok(())
    }

    async fn click(&self, strategy: &LocatorStrategy, timeout: Duration) -> Result<(), PortError> {
        self.record("click", strategy, None, timeout);
        self.resolve(strategy)
    }

    async fn hover(&self, strategy: &LocatorStrategy, timeout: Duration) -> Result<(), PortError> {
        self.record("hover", strategy, None, timeout);
        self.resolve(strategy)
    }

    async fn inner_text(
        &self,
        strategy: &LocatorStrategy,
        timeout: Duration,
    ) -> Result<String, PortError> {
        self.record("text", strategy, None, timeout);
        self.resolve(strategy)?;
        Ok(self
            .elements
            .get(strategy.selector())
            .map(|el| el.text.clone())
            .unwrap_or_default())
    }

    async fn page_title(&self) -> Result<String, PortError> {
        Ok(self.title.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_selector_fails_with_not_found() {
        let page = FakePage::new();
        let err = page
            .click(&LocatorStrategy::css("#missing"), Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::NotFound { .. }));
    }

    #[tokio::test]
    async fn scripted_failure_wins_over_resolution() {
        let page = FakePage::new();
        page.add_element("#login", "Login");
        page.fail_with(
            "#login",
            PortError::NotInteractable {
                selector: "#login".into(),
                reason: "covered by overlay".into(),
            },
        );
        let err = page
            .click(&LocatorStrategy::css("#login"), Duration::from_millis(10))
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::NotInteractable { .. }));
    }

    #[tokio::test]
    async fn fill_stores_the_value_and_records_the_call() {
        let page = FakePage::new();
        page.add_element("[name=login]", "");
        page.fill(
            &LocatorStrategy::css("[name=login]"),
            "user@example.com",
            Duration::from_millis(10),
        )
        .await
        .unwrap();
        assert_eq!(
            page.value_of("[name=login]").as_deref(),
            Some("user@example.com")
        );
        let calls = page.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].action, "fill");
        assert_eq!(calls[0].payload.as_deref(), Some("user@example.com"));
    }
}
