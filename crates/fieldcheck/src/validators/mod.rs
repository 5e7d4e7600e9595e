//! Leaf predicates
//!
//! A [`Validator`] is a pure boolean test of a state value. The built-in
//! variants are a closed set dispatched by pattern matching; anything else goes
//! through [`Validator::Custom`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldcheck::validators::Validator;
//!
//! let username = Validator::<String>::min_length(3);
//! assert!(username.is_valid(&"alice".to_string()));
//! assert!(!username.is_valid(&"al".to_string()));
//! ```

pub mod length;
pub mod nullable;
pub mod pattern;
pub mod related;

pub use related::RelatedValidator;

use crate::foundation::{FieldValue, RuleError};
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Signature of a caller-supplied predicate.
pub type PredicateFn<S> = dyn Fn(&S) -> bool + Send + Sync;

// ============================================================================
// VALIDATOR
// ============================================================================

/// A pure predicate over a state value.
pub enum Validator<S> {
    /// Delegates to a caller-supplied function.
    Custom(Arc<PredicateFn<S>>),
    /// The value is filled in; see [`nullable`].
    Required,
    /// Length equals the configured value.
    ExactLength(usize),
    /// Length is at least the configured value.
    MinLength(usize),
    /// Length is at most the configured value.
    MaxLength(usize),
    /// Text matches the pattern at least once.
    AllowPattern(Regex),
    /// Text matches the pattern zero times.
    DenyPattern(Regex),
    /// The value equals the captured target.
    IsSameAs(S),
    /// The value differs from the captured target.
    IsDifferentFrom(S),
}

impl<S> Validator<S> {
    /// Creates a custom predicate.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Creates a `required` predicate.
    #[must_use]
    pub fn required() -> Self {
        Self::Required
    }

    /// Creates an exact-length predicate.
    #[must_use]
    pub fn exact_length(length: usize) -> Self {
        Self::ExactLength(length)
    }

    /// Creates a minimum-length predicate.
    #[must_use]
    pub fn min_length(min: usize) -> Self {
        Self::MinLength(min)
    }

    /// Creates a maximum-length predicate.
    #[must_use]
    pub fn max_length(max: usize) -> Self {
        Self::MaxLength(max)
    }

    /// Compiles `pattern` into an allow-pattern predicate.
    pub fn allow_pattern(pattern: &str) -> Result<Self, RuleError> {
        pattern::compile(pattern).map(Self::AllowPattern)
    }

    /// Compiles `pattern` into a deny-pattern predicate.
    pub fn deny_pattern(pattern: &str) -> Result<Self, RuleError> {
        pattern::compile(pattern).map(Self::DenyPattern)
    }

    /// Creates an allow-pattern predicate from a compiled regex.
    #[must_use]
    pub fn allow_regex(regex: Regex) -> Self {
        Self::AllowPattern(regex)
    }

    /// Creates a deny-pattern predicate from a compiled regex.
    #[must_use]
    pub fn deny_regex(regex: Regex) -> Self {
        Self::DenyPattern(regex)
    }

    /// Creates an equality predicate against `target`.
    pub fn is_same_as(target: S) -> Self {
        Self::IsSameAs(target)
    }

    /// Creates an inequality predicate against `target`.
    pub fn is_different_from(target: S) -> Self {
        Self::IsDifferentFrom(target)
    }

    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Custom(_) => "custom",
            Self::Required => "required",
            Self::ExactLength(_) => "exact_length",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::AllowPattern(_) => "allow_pattern",
            Self::DenyPattern(_) => "deny_pattern",
            Self::IsSameAs(_) => "is_same_as",
            Self::IsDifferentFrom(_) => "is_different_from",
        }
    }
}

impl<S: FieldValue + PartialEq> Validator<S> {
    /// Tests `state`. Never panics on its own; a custom callback may.
    pub fn is_valid(&self, state: &S) -> bool {
        match self {
            Self::Custom(predicate) => predicate(state),
            Self::Required => nullable::is_present(state),
            Self::ExactLength(length) => length::has_exact_length(state, *length),
            Self::MinLength(min) => length::has_min_length(state, *min),
            Self::MaxLength(max) => length::has_max_length(state, *max),
            Self::AllowPattern(regex) => pattern::matches_allowed(state, regex),
            Self::DenyPattern(regex) => pattern::avoids_denied(state, regex),
            Self::IsSameAs(target) => state == target,
            Self::IsDifferentFrom(target) => state != target,
        }
    }
}

impl<S: Clone> Clone for Validator<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Custom(predicate) => Self::Custom(Arc::clone(predicate)),
            Self::Required => Self::Required,
            Self::ExactLength(length) => Self::ExactLength(*length),
            Self::MinLength(min) => Self::MinLength(*min),
            Self::MaxLength(max) => Self::MaxLength(*max),
            Self::AllowPattern(regex) => Self::AllowPattern(regex.clone()),
            Self::DenyPattern(regex) => Self::DenyPattern(regex.clone()),
            Self::IsSameAs(target) => Self::IsSameAs(target.clone()),
            Self::IsDifferentFrom(target) => Self::IsDifferentFrom(target.clone()),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for Validator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::Required => f.write_str("Required"),
            Self::ExactLength(length) => f.debug_tuple("ExactLength").field(length).finish(),
            Self::MinLength(min) => f.debug_tuple("MinLength").field(min).finish(),
            Self::MaxLength(max) => f.debug_tuple("MaxLength").field(max).finish(),
            Self::AllowPattern(regex) => f.debug_tuple("AllowPattern").field(&regex.as_str()).finish(),
            Self::DenyPattern(regex) => f.debug_tuple("DenyPattern").field(&regex.as_str()).finish(),
            Self::IsSameAs(target) => f.debug_tuple("IsSameAs").field(target).finish(),
            Self::IsDifferentFrom(target) => f.debug_tuple("IsDifferentFrom").field(target).finish(),
        }
    }
}
