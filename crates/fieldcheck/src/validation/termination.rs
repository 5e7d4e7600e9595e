//! Termination policies for sequential queues
//!
//! After each child of a queue finishes, the queue asks that child's own
//! `after` policy whether to stop. The policy sees the child's raw result, not
//! the accumulated composite.

use crate::payload::{Payload, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Signature of a caller-supplied stop predicate.
pub type StopFn<P> = dyn Fn(Option<&P>) -> bool + Send + Sync;

// ============================================================================
// SEVERITY FLAGS
// ============================================================================

/// Independent toggles for [`TerminationStrategy::StopAfterSeverity`].
///
/// # Examples
///
/// ```rust,ignore
/// use fieldcheck::validation::SeverityFlags;
///
/// let flags = SeverityFlags::failure().with_warning();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityFlags {
    /// Stop on [`Severity::Failure`].
    pub failure: bool,
    /// Stop on [`Severity::Warning`].
    pub warning: bool,
    /// Stop on [`Severity::Info`].
    pub info: bool,
    /// Stop on [`Severity::Success`].
    pub success: bool,
}

impl SeverityFlags {
    /// No flag set.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Only failures.
    #[must_use]
    pub fn failure() -> Self {
        Self {
            failure: true,
            ..Self::default()
        }
    }

    /// Every severity.
    #[must_use]
    pub fn all() -> Self {
        Self {
            failure: true,
            warning: true,
            info: true,
            success: true,
        }
    }

    /// Also stop on failures.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_failure(mut self) -> Self {
        self.failure = true;
        self
    }

    /// Also stop on warnings.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_warning(mut self) -> Self {
        self.warning = true;
        self
    }

    /// Also stop on info payloads.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_info(mut self) -> Self {
        self.info = true;
        self
    }

    /// Also stop on success payloads.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_success(mut self) -> Self {
        self.success = true;
        self
    }

    /// Whether `severity` is one of the selected flags.
    #[must_use]
    pub fn matches(self, severity: Severity) -> bool {
        match severity {
            Severity::Failure => self.failure,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
            Severity::Success => self.success,
        }
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.failure || self.warning || self.info || self.success)
    }
}

// ============================================================================
// TERMINATION STRATEGY
// ============================================================================

/// Decides whether a queue stops after a child produced `payload`.
pub enum TerminationStrategy<P> {
    /// Never stop.
    NeverStop,
    /// Always stop; a queue evaluates exactly one such child.
    AlwaysStop,
    /// Stop if the payload's own tag is a failure.
    StopAfterFailure,
    /// Stop if the payload is or transitively contains a failure.
    StopIfContainsFailure,
    /// Stop if the payload's tag is one of the selected severities.
    StopAfterSeverity(SeverityFlags),
    /// Delegates to a caller-supplied predicate.
    StopAfterCustom(Arc<StopFn<P>>),
}

impl<P: Payload> TerminationStrategy<P> {
    /// Creates a custom termination policy.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(Option<&P>) -> bool + Send + Sync + 'static,
    {
        Self::StopAfterCustom(Arc::new(predicate))
    }

    /// Whether evaluation should stop after a child produced `payload`.
    ///
    /// "No payload" only stops [`AlwaysStop`](Self::AlwaysStop) and whatever a
    /// custom predicate decides.
    pub fn should_stop(&self, payload: Option<&P>) -> bool {
        match self {
            Self::NeverStop => false,
            Self::AlwaysStop => true,
            Self::StopAfterFailure => payload.is_some_and(|p| p.severity().is_failure()),
            Self::StopIfContainsFailure => payload.is_some_and(Payload::contains_failure),
            Self::StopAfterSeverity(flags) => payload.is_some_and(|p| flags.matches(p.severity())),
            Self::StopAfterCustom(predicate) => predicate(payload),
        }
    }
}

impl<P> Clone for TerminationStrategy<P> {
    fn clone(&self) -> Self {
        match self {
            Self::NeverStop => Self::NeverStop,
            Self::AlwaysStop => Self::AlwaysStop,
            Self::StopAfterFailure => Self::StopAfterFailure,
            Self::StopIfContainsFailure => Self::StopIfContainsFailure,
            Self::StopAfterSeverity(flags) => Self::StopAfterSeverity(*flags),
            Self::StopAfterCustom(predicate) => Self::StopAfterCustom(Arc::clone(predicate)),
        }
    }
}

impl<P> fmt::Debug for TerminationStrategy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverStop => f.write_str("NeverStop"),
            Self::AlwaysStop => f.write_str("AlwaysStop"),
            Self::StopAfterFailure => f.write_str("StopAfterFailure"),
            Self::StopIfContainsFailure => f.write_str("StopIfContainsFailure"),
            Self::StopAfterSeverity(flags) => {
                f.debug_tuple("StopAfterSeverity").field(flags).finish()
            }
            Self::StopAfterCustom(_) => f.write_str("StopAfterCustom(..)"),
        }
    }
}
