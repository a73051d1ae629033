use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type the per-crate error enums convert into.
#[derive(Debug, Error, Clone)]
pub enum MendError {
    #[error("{message}")]
    Message { message: String },
}

impl MendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Selector strategy kind for one way of addressing a page element.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LocatorKind {
    Id,
    Css,
    XPath,
    Role,
    Text,
}

impl LocatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            LocatorKind::Id => "id",
            LocatorKind::Css => "css",
            LocatorKind::XPath => "xpath",
            LocatorKind::Role => "role",
            LocatorKind::Text => "text",
        }
    }
}

impl fmt::Display for LocatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One named way of reaching a page element. Immutable once constructed.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LocatorStrategy {
    kind: LocatorKind,
    selector: String,
}

impl LocatorStrategy {
    pub fn new(kind: LocatorKind, selector: impl Into<String>) -> Self {
        Self {
            kind,
            selector: selector.into(),
        }
    }

    pub fn id(selector: impl Into<String>) -> Self {
        Self::new(LocatorKind::Id, selector)
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(LocatorKind::Css, selector)
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::new(LocatorKind::XPath, selector)
    }

    pub fn role(selector: impl Into<String>) -> Self {
        Self::new(LocatorKind::Role, selector)
    }

    pub fn text(selector: impl Into<String>) -> Self {
        Self::new(LocatorKind::Text, selector)
    }

    pub fn kind(&self) -> LocatorKind {
        self.kind
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.selector)
    }
}

/// Ranked, non-empty sequence of strategies for one logical page element.
///
/// Rank order equals insertion order; callers supply strategies best-first.
/// The conventional shape is primary, fallback1, fallback2.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocatorSet {
    element: String,
    strategies: Vec<LocatorStrategy>,
}

impl LocatorSet {
    /// Start a set with its primary strategy; chain `.or()` for fallbacks.
    pub fn new(element: impl Into<String>, primary: LocatorStrategy) -> Self {
        Self {
            element: element.into(),
            strategies: vec![primary],
        }
    }

    pub fn or(mut self, fallback: LocatorStrategy) -> Self {
        self.strategies.push(fallback);
        self
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn primary(&self) -> &LocatorStrategy {
        &self.strategies[0]
    }

    pub fn strategies(&self) -> &[LocatorStrategy] {
        &self.strategies
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// One failed attempt inside a chain run. Built for the aggregated error
/// message only, never persisted.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttemptRecord {
    pub rank: usize,
    pub strategy: String,
    pub error: String,
}

impl AttemptRecord {
    pub fn new(rank: usize, strategy: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            rank,
            strategy: strategy.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for AttemptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.rank, self.strategy, self.error)
    }
}
