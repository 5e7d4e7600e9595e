//! Composite policies: how a queue folds child results into one payload
//!
//! A queue starts with no payload and, after each child, calls
//! [`CompositeStrategy::compose`] with the accumulated value and the child's
//! result. The return value becomes the new accumulated value.

use super::Payload;
use std::fmt;
use std::sync::Arc;

/// Signature of a caller-supplied composite function.
pub type ComposeFn<P> = dyn Fn(Option<P>, Option<P>) -> Option<P> + Send + Sync;

// ============================================================================
// COMPOSITE STRATEGY
// ============================================================================

/// Merges an accumulated payload with the next child result.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldcheck::payload::{CompositeStrategy, UiPayload};
///
/// let keep_last = CompositeStrategy::<UiPayload>::Last;
/// let merged = keep_last.compose(Some(UiPayload::info("a")), None);
/// assert_eq!(merged, Some(UiPayload::info("a")));
/// ```
pub enum CompositeStrategy<P> {
    /// Merges both payloads with [`Payload::combine`].
    Combine,
    /// Keeps the more severe payload; the accumulated one wins a tie.
    MostSevere,
    /// Keeps the first payload produced.
    First,
    /// Keeps the latest payload produced; "no payload" never overwrites.
    Last,
    /// Delegates to a caller-supplied function.
    Custom(Arc<ComposeFn<P>>),
}

impl<P: Payload> CompositeStrategy<P> {
    /// Creates a custom composite policy.
    pub fn custom<F>(compose: F) -> Self
    where
        F: Fn(Option<P>, Option<P>) -> Option<P> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(compose))
    }

    /// Folds `next` into `accumulated`.
    pub fn compose(&self, accumulated: Option<P>, next: Option<P>) -> Option<P> {
        match self {
            Self::Custom(compose) => compose(accumulated, next),
            Self::Combine => match (accumulated, next) {
                (Some(acc), Some(next)) => Some(acc.combine(next)),
                (acc, next) => acc.or(next),
            },
            Self::MostSevere => match (accumulated, next) {
                (Some(acc), Some(next)) if next.severity() > acc.severity() => Some(next),
                (Some(acc), _) => Some(acc),
                (None, next) => next,
            },
            Self::First => accumulated.or(next),
            Self::Last => next.or(accumulated),
        }
    }
}

impl<P> Default for CompositeStrategy<P> {
    fn default() -> Self {
        Self::Combine
    }
}

impl<P> Clone for CompositeStrategy<P> {
    fn clone(&self) -> Self {
        match self {
            Self::Combine => Self::Combine,
            Self::MostSevere => Self::MostSevere,
            Self::First => Self::First,
            Self::Last => Self::Last,
            Self::Custom(compose) => Self::Custom(Arc::clone(compose)),
        }
    }
}

impl<P> fmt::Debug for CompositeStrategy<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combine => f.write_str("Combine"),
            Self::MostSevere => f.write_str("MostSevere"),
            Self::First => f.write_str("First"),
            Self::Last => f.write_str("Last"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
