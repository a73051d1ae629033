use std::time::{Duration, Instant};

use pagemend_core_types::{AttemptRecord, LocatorSet, LocatorStrategy};
use tracing::{error, info, instrument, warn};

use crate::errors::{ChainError, PortError};
use crate::model::{ActionKind, ActionOpt, ActionReport, ExecCtx};
use crate::policy::ChainPolicy;
use crate::ports::PagePort;

pub struct RuntimeDeps<'a> {
    pub page: &'a dyn PagePort,
    pub policy: &'a ChainPolicy,
}

/// Runs one action against a locator set, strategies in rank order, one
/// attempt each, short-circuiting on the first success. Returns the text
/// payload for `ActionKind::Text`, `None` otherwise.
#[instrument(skip_all, fields(action = %ctx.action_id, kind = kind.name(), element = set.element()))]
pub async fn execute(
    ctx: &ExecCtx,
    kind: ActionKind,
    set: &LocatorSet,
    payload: Option<&str>,
    opt: &ActionOpt,
    deps: RuntimeDeps<'_>,
) -> Result<(ActionReport, Option<String>), ChainError> {
    if !deps.policy.enabled {
        return Err(ChainError::Disabled);
    }

    let timeout = opt
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| deps.policy.timeouts.for_kind(kind));

    let mut report = ActionReport::new(set.element(), Instant::now());
    let total = set.len();

    for (rank, strategy) in set.strategies().iter().enumerate() {
        if ctx.cancel.is_cancelled() {
            return Err(ChainError::Cancelled);
        }
        let remaining = ctx.remaining();
        if remaining.is_zero() {
            return Err(ChainError::DeadlineExceeded {
                element: set.element().to_string(),
            });
        }

        let attempt_timeout = timeout.min(remaining);
        match attempt(deps.page, kind, strategy, payload, attempt_timeout).await {
            Ok(text) => {
                report.ok = true;
                report.strategy_used = Some(strategy.to_string());
                report.rank_used = Some(rank);
                if rank > 0 && deps.policy.log_fallback_success {
                    info!(
                        strategy = %strategy,
                        rank,
                        "fallback strategy succeeded; primary locator has drifted"
                    );
                }
                return Ok((report.finish(Instant::now()), text));
            }
            Err(err) => {
                report
                    .attempts
                    .push(AttemptRecord::new(rank, strategy.to_string(), err.to_string()));
                if rank + 1 < total {
                    warn!(
                        strategy = %strategy,
                        error = %err,
                        next_rank = rank + 1,
                        "locator strategy failed, trying next fallback"
                    );
                }
            }
        }
    }

    let err = ChainError::Exhausted {
        element: set.element().to_string(),
        attempts: report.attempts.clone(),
    };
    error!(element = set.element(), attempts = total, "{err}");
    Err(err)
}

async fn attempt(
    page: &dyn PagePort,
    kind: ActionKind,
    strategy: &LocatorStrategy,
    payload: Option<&str>,
    timeout: Duration,
) -> Result<Option<String>, PortError> {
    match kind {
        ActionKind::Fill => {
            page.fill(strategy, payload.unwrap_or_default(), timeout)
                .await?;
            Ok(None)
        }
        ActionKind::Click => {
            page.click(strategy, timeout).await?;
            Ok(None)
        }
        ActionKind::Hover => {
            page.hover(strategy, timeout).await?;
            Ok(None)
        }
        ActionKind::Text => Ok(Some(page.inner_text(strategy, timeout).await?)),
    }
}
