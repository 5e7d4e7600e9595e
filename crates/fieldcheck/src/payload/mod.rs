//! Severity-tagged validation results
//!
//! The engine never inspects payload content. It hands configured payloads
//! back, merges them through a [`CompositeStrategy`], and asks termination
//! policies about their [`Severity`]. Anything implementing [`Payload`] can be
//! used; [`UiPayload`] is the implementation shipped with the crate.

pub mod composite;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use composite::CompositeStrategy;

// ============================================================================
// SEVERITY
// ============================================================================

/// Severity tag of a payload, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The value passed.
    #[default]
    Success,
    /// Informational note.
    Info,
    /// Should be addressed, does not block.
    Warning,
    /// Must be fixed.
    Failure,
}

impl Severity {
    /// Returns true for [`Severity::Failure`].
    #[must_use]
    pub fn is_failure(self) -> bool {
        self == Self::Failure
    }

    /// Lowercase name, as used in schemas and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PAYLOAD TRAIT
// ============================================================================

/// A severity-tagged validation result.
pub trait Payload: Clone {
    /// The severity tag of this payload itself.
    fn severity(&self) -> Severity;

    /// Whether this payload is a failure or transitively contains one.
    ///
    /// The default only checks the top-level tag; payloads that nest other
    /// payloads must override it.
    fn contains_failure(&self) -> bool {
        self.severity().is_failure()
    }

    /// Merges `next` into `self`; used by [`CompositeStrategy::Combine`].
    ///
    /// The default keeps the more severe of the two, preferring `self` on a
    /// tie.
    #[must_use]
    fn combine(self, next: Self) -> Self {
        if next.severity() > self.severity() {
            next
        } else {
            self
        }
    }
}

// ============================================================================
// UI PAYLOAD
// ============================================================================

/// A displayable payload: severity, message text and nested payloads.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldcheck::payload::{Payload, Severity, UiPayload};
///
/// let merged = UiPayload::warning("Weak password").combine(UiPayload::failure("Too short"));
/// assert_eq!(merged.severity(), Severity::Failure);
/// assert_eq!(merged.nested.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UiPayload {
    /// Severity of this payload.
    pub severity: Severity,

    /// Human-readable message; empty for pure groups.
    #[serde(default)]
    pub text: String,

    /// Payloads grouped under this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<UiPayload>,
}

impl UiPayload {
    /// Creates a payload with a severity and message.
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
            nested: Vec::new(),
        }
    }

    /// Creates a success payload.
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    /// Creates an info payload.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    /// Creates a warning payload.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    /// Creates a failure payload.
    pub fn failure(text: impl Into<String>) -> Self {
        Self::new(Severity::Failure, text)
    }

    /// Creates a group tagged with the most severe of `items`.
    ///
    /// An empty group is a success.
    pub fn group(items: Vec<UiPayload>) -> Self {
        let severity = items
            .iter()
            .map(|item| item.severity)
            .max()
            .unwrap_or_default();
        Self {
            severity,
            text: String::new(),
            nested: items,
        }
    }

    /// Attaches nested payloads without changing this payload's severity.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, nested: Vec<UiPayload>) -> Self {
        self.nested = nested;
        self
    }

    /// Collects this payload and every nested payload, depth-first.
    pub fn flatten(&self) -> Vec<&UiPayload> {
        let mut out = vec![self];
        for item in &self.nested {
            out.extend(item.flatten());
        }
        out
    }
}

impl Payload for UiPayload {
    fn severity(&self) -> Severity {
        self.severity
    }

    fn contains_failure(&self) -> bool {
        self.severity.is_failure() || self.nested.iter().any(UiPayload::contains_failure)
    }

    fn combine(self, next: Self) -> Self {
        UiPayload::group(vec![self, next])
    }
}

impl fmt::Display for UiPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "[{}]", self.severity)?;
        } else {
            write!(f, "[{}] {}", self.severity, self.text)?;
        }
        if !self.nested.is_empty() {
            write!(f, " ({} nested)", self.nested.len())?;
        }
        Ok(())
    }
}
