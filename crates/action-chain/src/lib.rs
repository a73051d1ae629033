//! Fallback-chain action wrapper: runs a UI action against a ranked
//! [`LocatorSet`](pagemend_core_types::LocatorSet), one bounded attempt per
//! strategy in rank order, short-circuiting on the first success and
//! aggregating every failure into a single diagnostic error when the set is
//! exhausted.

pub mod api;
pub mod errors;
pub mod model;
pub mod policy;
pub mod ports;

mod runner;

#[cfg(feature = "fake-page")]
pub mod fake;

pub use api::{ChainRunner, ChainRunnerBuilder};
pub use errors::{ChainError, PortError};
pub use model::{ActionKind, ActionOpt, ActionReport, ExecCtx};
pub use policy::{ChainPolicy, ChainTimeouts};
