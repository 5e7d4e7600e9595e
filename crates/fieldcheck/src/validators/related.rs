//! Factories for dependent predicates
//!
//! A related node does not know its comparison value up front. For every
//! matching history entry it asks a [`RelatedValidator`] to build a predicate
//! bound to that entry's state. The state is snapshotted at build time.

use super::Validator;
use crate::foundation::ValidatorTarget;
use std::fmt;
use std::sync::Arc;

/// Signature of a caller-supplied predicate factory.
pub type BuildFn<S> = dyn Fn(&S) -> Validator<S> + Send + Sync;

/// Builds a [`Validator`] bound to a target's state.
pub enum RelatedValidator<S> {
    /// Valid iff the state equals the target's state.
    IsSameAs,
    /// Valid iff the state differs from the target's state.
    IsDifferentFrom,
    /// Delegates to a caller-supplied factory.
    Custom(Arc<BuildFn<S>>),
}

impl<S: Clone> RelatedValidator<S> {
    /// Creates a custom factory.
    pub fn custom<F>(build: F) -> Self
    where
        F: Fn(&S) -> Validator<S> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(build))
    }

    /// Builds a predicate whose comparison value is `target.state()` as of now.
    pub fn build<T>(&self, target: &T) -> Validator<S>
    where
        T: ValidatorTarget<S> + ?Sized,
    {
        match self {
            Self::IsSameAs => Validator::IsSameAs(target.state().clone()),
            Self::IsDifferentFrom => Validator::IsDifferentFrom(target.state().clone()),
            Self::Custom(build) => build(target.state()),
        }
    }
}

impl<S> Clone for RelatedValidator<S> {
    fn clone(&self) -> Self {
        match self {
            Self::IsSameAs => Self::IsSameAs,
            Self::IsDifferentFrom => Self::IsDifferentFrom,
            Self::Custom(build) => Self::Custom(Arc::clone(build)),
        }
    }
}

impl<S> fmt::Debug for RelatedValidator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IsSameAs => f.write_str("IsSameAs"),
            Self::IsDifferentFrom => f.write_str("IsDifferentFrom"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
