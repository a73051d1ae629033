use std::time::Duration;

use async_trait::async_trait;
use pagemend_core_types::LocatorStrategy;

use crate::errors::PortError;

/// Seam to the browser-automation layer. One bounded attempt per call: the
/// implementation waits at most `timeout` for the element and the action,
/// with no retry of its own.
#[async_trait]
pub trait PagePort: Send + Sync {
    async fn fill(
        &self,
        strategy: &LocatorStrategy,
        text: &str,
        timeout: Duration,
    ) -> Result<(), PortError>;

    async fn click(&self, strategy: &LocatorStrategy, timeout: Duration) -> Result<(), PortError>;

    async fn hover(&self, strategy: &LocatorStrategy, timeout: Duration) -> Result<(), PortError>;

    async fn inner_text(
        &self,
        strategy: &LocatorStrategy,
        timeout: Duration,
    ) -> Result<String, PortError>;

    async fn page_title(&self) -> Result<String, PortError>;
}
