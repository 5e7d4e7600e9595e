//! Declarative rule trees
//!
//! Describes a [`Validation`] over `String` states and `String` keys as plain
//! data, so forms can ship their rules as JSON instead of Rust code. Custom
//! predicates, policies and factories have no declarative form.
//!
//! ```json
//! {
//!   "type": "queue",
//!   "key": "password",
//!   "children": [
//!     { "type": "message", "rule": { "kind": "required" },
//!       "failure": { "severity": "failure", "text": "Required" } },
//!     { "type": "message", "rule": { "kind": "min_length", "min": 8 },
//!       "failure": { "severity": "failure", "text": "Too short" } }
//!   ]
//! }
//! ```

use crate::foundation::RuleError;
use crate::payload::{CompositeStrategy, UiPayload};
use crate::validation::{SeverityFlags, TerminationStrategy, Validation};
use crate::validators::{RelatedValidator, Validator};
use serde::{Deserialize, Serialize};

/// A tree built from a schema.
pub type SchemaValidation = Validation<String, String, UiPayload>;

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parses and builds a tree from JSON text.
pub fn from_json(json: &str) -> Result<SchemaValidation, RuleError> {
    let spec: NodeSpec = serde_json::from_str(json)?;
    spec.build()
}

/// Builds a tree from an already parsed JSON value.
pub fn from_value(value: serde_json::Value) -> Result<SchemaValidation, RuleError> {
    let spec: NodeSpec = serde_json::from_value(value)?;
    spec.build()
}

// ============================================================================
// NODE
// ============================================================================

/// One node of a declarative tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Key to record the state under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Termination policy; the node type's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<TerminationSpec>,

    /// Variant-specific part.
    #[serde(flatten)]
    pub kind: NodeKindSpec,
}

/// Variant-specific part of a [`NodeSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKindSpec {
    Valid,
    Message {
        rule: PredicateSpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        success: Option<UiPayload>,
        failure: UiPayload,
    },
    Queue {
        children: Vec<NodeSpec>,
        #[serde(default)]
        composite: CompositeSpec,
    },
    Related {
        related_key: String,
        rule: RelatedSpec,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        success: Option<UiPayload>,
        failure: UiPayload,
    },
}

impl NodeSpec {
    /// Builds the tree described by this spec.
    pub fn build(&self) -> Result<SchemaValidation, RuleError> {
        let node = self.build_node()?;
        tracing::debug!(kind = node.rule().kind(), key = ?node.key(), "built validation from schema");
        Ok(node)
    }

    fn build_node(&self) -> Result<SchemaValidation, RuleError> {
        let mut node = match &self.kind {
            NodeKindSpec::Valid => Validation::valid(),
            NodeKindSpec::Message {
                rule,
                success,
                failure,
            } => with_optional_success(
                Validation::message(rule.build()?, failure.clone()),
                success.as_ref(),
            ),
            NodeKindSpec::Queue {
                children,
                composite,
            } => {
                let children = children
                    .iter()
                    .map(NodeSpec::build_node)
                    .collect::<Result<Vec<_>, _>>()?;
                Validation::queue(children).with_composite(composite.build())
            }
            NodeKindSpec::Related {
                related_key,
                rule,
                success,
                failure,
            } => with_optional_success(
                Validation::related(related_key.clone(), rule.build(), failure.clone()),
                success.as_ref(),
            ),
        };

        if let Some(key) = &self.key {
            node = node.with_key(key.clone());
        }
        if let Some(after) = &self.after {
            node = node.with_after(after.build()?);
        }
        Ok(node)
    }
}

fn with_optional_success(node: SchemaValidation, success: Option<&UiPayload>) -> SchemaValidation {
    match success {
        Some(payload) => node.with_success(payload.clone()),
        None => node,
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Declarative [`Validator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredicateSpec {
    Required,
    ExactLength { length: usize },
    MinLength { min: usize },
    MaxLength { max: usize },
    AllowPattern { pattern: String },
    DenyPattern { pattern: String },
    IsSameAs { value: String },
    IsDifferentFrom { value: String },
}

impl PredicateSpec {
    /// Builds the predicate; fails only on an invalid pattern.
    pub fn build(&self) -> Result<Validator<String>, RuleError> {
        Ok(match self {
            Self::Required => Validator::required(),
            Self::ExactLength { length } => Validator::exact_length(*length),
            Self::MinLength { min } => Validator::min_length(*min),
            Self::MaxLength { max } => Validator::max_length(*max),
            Self::AllowPattern { pattern } => Validator::allow_pattern(pattern)?,
            Self::DenyPattern { pattern } => Validator::deny_pattern(pattern)?,
            Self::IsSameAs { value } => Validator::is_same_as(value.clone()),
            Self::IsDifferentFrom { value } => Validator::is_different_from(value.clone()),
        })
    }
}

/// Declarative [`RelatedValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedSpec {
    IsSameAs,
    IsDifferentFrom,
}

impl RelatedSpec {
    /// Builds the factory.
    pub fn build(self) -> RelatedValidator<String> {
        match self {
            Self::IsSameAs => RelatedValidator::IsSameAs,
            Self::IsDifferentFrom => RelatedValidator::IsDifferentFrom,
        }
    }
}

// ============================================================================
// POLICIES
// ============================================================================

/// Declarative [`TerminationStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationSpec {
    NeverStop,
    AlwaysStop,
    StopAfterFailure,
    StopIfContainsFailure,
    StopAfterSeverity(SeverityFlags),
}

impl TerminationSpec {
    /// Builds the policy, rejecting a severity policy with no flag set.
    pub fn build(self) -> Result<TerminationStrategy<UiPayload>, RuleError> {
        Ok(match self {
            Self::NeverStop => TerminationStrategy::NeverStop,
            Self::AlwaysStop => TerminationStrategy::AlwaysStop,
            Self::StopAfterFailure => TerminationStrategy::StopAfterFailure,
            Self::StopIfContainsFailure => TerminationStrategy::StopIfContainsFailure,
            Self::StopAfterSeverity(flags) if flags.is_empty() => {
                return Err(RuleError::InvalidSeverityFlags);
            }
            Self::StopAfterSeverity(flags) => TerminationStrategy::StopAfterSeverity(flags),
        })
    }
}

/// Declarative [`CompositeStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeSpec {
    #[default]
    Combine,
    MostSevere,
    First,
    Last,
}

impl CompositeSpec {
    /// Builds the policy.
    pub fn build(self) -> CompositeStrategy<UiPayload> {
        match self {
            Self::Combine => CompositeStrategy::Combine,
            Self::MostSevere => CompositeStrategy::MostSevere,
            Self::First => CompositeStrategy::First,
            Self::Last => CompositeStrategy::Last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Rule;
    use serde_json::json;

    #[test]
    fn test_message_defaults() {
        let node = from_value(json!({
            "type": "message",
            "rule": { "kind": "required" },
            "failure": { "severity": "failure", "text": "Required" }
        }))
        .unwrap();
        assert!(node.key().is_none());
        assert!(matches!(node.after(), TerminationStrategy::StopAfterFailure));
        assert!(matches!(node.rule(), Rule::Message { success: None, .. }));
    }

    #[test]
    fn test_key_after_and_composite() {
        let node = from_value(json!({
            "type": "queue",
            "key": "email",
            "after": "never_stop",
            "composite": "most_severe",
            "children": [{ "type": "valid" }]
        }))
        .unwrap();
        assert_eq!(node.key().map(String::as_str), Some("email"));
        assert!(matches!(node.after(), TerminationStrategy::NeverStop));
        assert!(matches!(
            node.rule(),
            Rule::Queue { composite: CompositeStrategy::MostSevere, children } if children.len() == 1
        ));
    }

    #[test]
    fn test_severity_after() {
        let node = from_value(json!({
            "type": "valid",
            "after": { "stop_after_severity": { "warning": true } }
        }))
        .unwrap();
        assert!(matches!(
            node.after(),
            TerminationStrategy::StopAfterSeverity(flags) if *flags == SeverityFlags::none().with_warning()
        ));
    }

    #[test]
    fn test_empty_severity_flags_rejected() {
        let err = from_value(json!({
            "type": "valid",
            "after": { "stop_after_severity": {} }
        }))
        .unwrap_err();
        assert!(matches!(err, RuleError::InvalidSeverityFlags));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = from_value(json!({
            "type": "message",
            "rule": { "kind": "allow_pattern", "pattern": "(" },
            "failure": { "severity": "failure", "text": "bad" }
        }))
        .unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn test_unknown_type_is_schema_error() {
        let err = from_json(r#"{ "type": "parallel" }"#).unwrap_err();
        assert!(matches!(err, RuleError::Schema(_)));
    }

    #[test]
    fn test_spec_serializes_back() {
        let spec = NodeSpec {
            key: Some("confirm".to_string()),
            after: None,
            kind: NodeKindSpec::Related {
                related_key: "password".to_string(),
                rule: RelatedSpec::IsSameAs,
                success: None,
                failure: UiPayload::failure("Mismatch"),
            },
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "related");
        assert_eq!(value["rule"], "is_same_as");
        let back: NodeSpec = serde_json::from_value(value).unwrap();
        assert_eq!(back, spec);
    }
}
