//! Regular-expression checks
//!
//! Only textual state can match. Any other state fails both the allow and the
//! deny check.

use crate::foundation::{FieldValue, RuleError};
use regex::Regex;

/// Compiles `pattern`, mapping failures to [`RuleError::InvalidPattern`].
pub fn compile(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::invalid_pattern(pattern, source))
}

/// Valid iff `regex` matches the text at least once.
#[must_use]
pub fn matches_allowed<S: FieldValue + ?Sized>(state: &S, regex: &Regex) -> bool {
    state.as_text().is_some_and(|text| regex.is_match(text))
}

/// Valid iff `regex` matches the text zero times.
#[must_use]
pub fn avoids_denied<S: FieldValue + ?Sized>(state: &S, regex: &Regex) -> bool {
    state.as_text().is_some_and(|text| !regex.is_match(text))
}
