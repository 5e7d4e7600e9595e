//! Error types for rule construction
//!
//! Only building a tree can fail. Once a [`Validation`](crate::validation::Validation)
//! exists, evaluating it never produces an error.

// ============================================================================
// RULE ERROR
// ============================================================================

/// Errors raised while constructing validators or decoding rule schemas.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RuleError {
    /// A pattern string did not compile to a regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as supplied by the caller.
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A declarative rule schema could not be decoded.
    #[error("invalid rule schema: {0}")]
    Schema(#[from] serde_json::Error),

    /// A severity-based termination policy with every flag cleared.
    ///
    /// Such a policy can never fire, which is always a configuration mistake
    /// in a declarative schema; use `never_stop` instead.
    #[error("stop_after_severity requires at least one severity flag")]
    InvalidSeverityFlags,
}

impl RuleError {
    /// Creates an [`RuleError::InvalidPattern`] error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
