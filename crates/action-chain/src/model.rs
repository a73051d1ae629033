use std::time::{Duration, Instant};

use pagemend_core_types::{ActionId, AttemptRecord};
use tokio_util::sync::CancellationToken;

/// Execution context carried through one chain run.
#[derive(Clone, Debug)]
pub struct ExecCtx {
    pub action_id: ActionId,
    pub deadline: Instant,
    pub cancel: CancellationToken,
}

impl ExecCtx {
    pub fn new(action_id: ActionId, deadline: Instant, cancel: CancellationToken) -> Self {
        Self {
            action_id,
            deadline,
            cancel,
        }
    }

    /// Fresh context with a relative deadline and its own cancellation token.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(
            ActionId::new(),
            Instant::now() + timeout,
            CancellationToken::new(),
        )
    }

    pub fn remaining(&self) -> Duration {
        self.deadline
            .checked_duration_since(Instant::now())
            .unwrap_or(Duration::ZERO)
    }
}

/// The UI action a chain run performs against each strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ActionKind {
    Fill,
    Click,
    Text,
    Hover,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Fill => "fill",
            ActionKind::Click => "click",
            ActionKind::Text => "text",
            ActionKind::Hover => "hover",
        }
    }
}

/// Optional per-call tweaks.
#[derive(Clone, Debug, Default)]
pub struct ActionOpt {
    /// Overrides the policy timeout for this call only.
    pub timeout_ms: Option<u64>,
}

/// Outcome of one chain run, whether it short-circuited or exhausted.
#[derive(Clone, Debug)]
pub struct ActionReport {
    pub ok: bool,
    pub element: String,
    pub started_at: Instant,
    pub finished_at: Instant,
    pub latency_ms: u128,
    /// Label of the strategy that won, when one did.
    pub strategy_used: Option<String>,
    /// Rank of the winning strategy; 0 means the primary held.
    pub rank_used: Option<usize>,
    /// Failed attempts that preceded success or exhaustion, in rank order.
    pub attempts: Vec<AttemptRecord>,
}

impl ActionReport {
    pub fn new(element: impl Into<String>, started_at: Instant) -> Self {
        Self {
            ok: false,
            element: element.into(),
            started_at,
            finished_at: started_at,
            latency_ms: 0,
            strategy_used: None,
            rank_used: None,
            attempts: Vec::new(),
        }
    }

    pub fn finish(mut self, finished_at: Instant) -> Self {
        self.finished_at = finished_at;
        self.latency_ms = finished_at
            .saturating_duration_since(self.started_at)
            .as_millis();
        self
    }

    /// True when the chain fell through to a fallback before succeeding.
    pub fn drifted(&self) -> bool {
        matches!(self.rank_used, Some(rank) if rank > 0)
    }
}
