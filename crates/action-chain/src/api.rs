use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagemend_core_types::{LocatorSet, MendError};

use crate::errors::ChainError;
use crate::model::{ActionKind, ActionOpt, ActionReport, ExecCtx};
use crate::policy::ChainPolicy;
use crate::ports::PagePort;
use crate::runner::{execute, RuntimeDeps};

/// Self-healing action surface over one page.
///
/// The `*_report` variants take a caller-supplied execution context and
/// return the [`ActionReport`] describing which strategy won; the plain
/// variants build a fresh context bounding the whole pass and discard the
/// report.
#[async_trait]
pub trait ChainRunner: Send + Sync {
    async fn fill_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        text: &str,
        opt: &ActionOpt,
    ) -> Result<ActionReport, MendError>;

    async fn click_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        opt: &ActionOpt,
    ) -> Result<ActionReport, MendError>;

    async fn hover_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        opt: &ActionOpt,
    ) -> Result<ActionReport, MendError>;

    async fn text_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        opt: &ActionOpt,
    ) -> Result<(String, ActionReport), MendError>;

    async fn fill(&self, set: &LocatorSet, text: &str, opt: &ActionOpt) -> Result<(), MendError>;

    async fn click(&self, set: &LocatorSet, opt: &ActionOpt) -> Result<(), MendError>;

    async fn hover(&self, set: &LocatorSet, opt: &ActionOpt) -> Result<(), MendError>;

    async fn text(&self, set: &LocatorSet, opt: &ActionOpt) -> Result<String, MendError>;

    async fn page_title(&self) -> Result<String, MendError>;
}

pub struct ChainRunnerBuilder {
    policy: ChainPolicy,
    page: Option<Arc<dyn PagePort>>,
}

impl ChainRunnerBuilder {
    pub fn new(policy: ChainPolicy) -> Self {
        Self { policy, page: None }
    }

    pub fn with_page(mut self, page: Arc<dyn PagePort>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn build(self) -> Arc<dyn ChainRunner> {
        Arc::new(ChainRunnerImpl {
            policy: self.policy,
            page: self.page.expect("page port is required"),
        })
    }
}

pub struct ChainRunnerImpl {
    policy: ChainPolicy,
    page: Arc<dyn PagePort>,
}

impl ChainRunnerImpl {
    async fn run(
        &self,
        ctx: &ExecCtx,
        kind: ActionKind,
        set: &LocatorSet,
        payload: Option<&str>,
        opt: &ActionOpt,
    ) -> Result<(ActionReport, Option<String>), MendError> {
        let deps = RuntimeDeps {
            page: self.page.as_ref(),
            policy: &self.policy,
        };
        Ok(execute(ctx, kind, set, payload, opt, deps).await?)
    }

    /// Wall-clock budget for one full pass over `set`: each strategy gets
    /// one bounded attempt, so the pass needs at most `per_attempt * len`.
    fn pass_budget(&self, kind: ActionKind, set: &LocatorSet, opt: &ActionOpt) -> Duration {
        let per_attempt = opt
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.policy.timeouts.for_kind(kind));
        per_attempt * set.len() as u32
    }
}

#[async_trait]
impl ChainRunner for ChainRunnerImpl {
    async fn fill_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        text: &str,
        opt: &ActionOpt,
    ) -> Result<ActionReport, MendError> {
        let (report, _) = self.run(ctx, ActionKind::Fill, set, Some(text), opt).await?;
        Ok(report)
    }

    async fn click_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        opt: &ActionOpt,
    ) -> Result<ActionReport, MendError> {
        let (report, _) = self.run(ctx, ActionKind::Click, set, None, opt).await?;
        Ok(report)
    }

    async fn hover_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        opt: &ActionOpt,
    ) -> Result<ActionReport, MendError> {
        let (report, _) = self.run(ctx, ActionKind::Hover, set, None, opt).await?;
        Ok(report)
    }

    async fn text_report(
        &self,
        ctx: &ExecCtx,
        set: &LocatorSet,
        opt: &ActionOpt,
    ) -> Result<(String, ActionReport), MendError> {
        let (report, text) = self.run(ctx, ActionKind::Text, set, None, opt).await?;
        Ok((text.unwrap_or_default(), report))
    }

    async fn fill(&self, set: &LocatorSet, text: &str, opt: &ActionOpt) -> Result<(), MendError> {
        let ctx = ExecCtx::with_timeout(self.pass_budget(ActionKind::Fill, set, opt));
        self.fill_report(&ctx, set, text, opt).await.map(|_| ())
    }

    async fn click(&self, set: &LocatorSet, opt: &ActionOpt) -> Result<(), MendError> {
        let ctx = ExecCtx::with_timeout(self.pass_budget(ActionKind::Click, set, opt));
        self.click_report(&ctx, set, opt).await.map(|_| ())
    }

    async fn hover(&self, set: &LocatorSet, opt: &ActionOpt) -> Result<(), MendError> {
        let ctx = ExecCtx::with_timeout(self.pass_budget(ActionKind::Hover, set, opt));
        self.hover_report(&ctx, set, opt).await.map(|_| ())
    }

    async fn text(&self, set: &LocatorSet, opt: &ActionOpt) -> Result<String, MendError> {
        let ctx = ExecCtx::with_timeout(self.pass_budget(ActionKind::Text, set, opt));
        self.text_report(&ctx, set, opt).await.map(|(text, _)| text)
    }

    async fn page_title(&self) -> Result<String, MendError> {
        if !self.policy.enabled {
            return Err(ChainError::Disabled.into());
        }
        self.page.page_title().await.map_err(|err| {
            ChainError::Attempt {
                strategy: "page_title".to_string(),
                source: err,
            }
            .into()
        })
    }
}
