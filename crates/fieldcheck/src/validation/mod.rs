//! Validation trees and the recursive traversal
//!
//! A [`Validation`] node is one of four [`Rule`]s, plus an optional key and a
//! termination policy shared by every variant:
//!
//! - **Valid**: always yields no payload.
//! - **Message**: one predicate, a success payload (optional) and a failure
//!   payload.
//! - **Queue**: children evaluated in order, folded through a composite
//!   policy, stopping as soon as a child's own `after` policy fires.
//! - **Related**: re-checks the state against every history entry recorded
//!   under another key.
//!
//! Evaluation is depth-first and synchronous. A keyed node records its state
//! in the [`History`] only after its own result is computed, so later nodes in
//! the pass see it and earlier ones never do.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldcheck::prelude::*;
//!
//! let name = Validation::queue(vec![
//!     Validation::message(Validator::required(), UiPayload::failure("Required")),
//!     Validation::message(Validator::min_length(5), UiPayload::failure("Too short")),
//! ]);
//!
//! let (result, _) = name.validate_fresh(&String::new());
//! assert_eq!(result, Some(UiPayload::failure("Required")));
//! ```

pub mod termination;

pub use termination::{SeverityFlags, TerminationStrategy};

use crate::foundation::{FieldValue, History};
use crate::payload::{CompositeStrategy, Payload, UiPayload};
use crate::validators::{RelatedValidator, Validator};
use std::fmt;

// ============================================================================
// RULE
// ============================================================================

/// The variant-specific part of a [`Validation`] node.
#[derive(Debug, Clone)]
pub enum Rule<S, K, P> {
    /// No-op; always yields no payload.
    Valid,
    /// A single predicate.
    Message {
        validator: Validator<S>,
        success: Option<P>,
        failure: P,
    },
    /// Children evaluated in declared order.
    Queue {
        children: Vec<Validation<S, K, P>>,
        composite: CompositeStrategy<P>,
    },
    /// A predicate bound to previously recorded states of `related_key`.
    Related {
        related_key: K,
        factory: RelatedValidator<S>,
        success: Option<P>,
        failure: P,
    },
}

impl<S, K, P> Rule<S, K, P> {
    /// Short name of the variant, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Message { .. } => "message",
            Self::Queue { .. } => "queue",
            Self::Related { .. } => "related",
        }
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// An immutable node of a validation tree.
///
/// Trees hold no evaluation state and can be shared across any number of
/// `validate` calls, including concurrent ones, as long as each call brings
/// its own [`History`].
#[derive(Debug, Clone)]
pub struct Validation<S, K, P = UiPayload> {
    key: Option<K>,
    after: TerminationStrategy<P>,
    rule: Rule<S, K, P>,
}

impl<S, K, P> Validation<S, K, P> {
    /// Assembles a node from its parts.
    pub fn from_parts(key: Option<K>, after: TerminationStrategy<P>, rule: Rule<S, K, P>) -> Self {
        Self { key, after, rule }
    }

    /// A node that never produces a payload. Defaults to `NeverStop`.
    #[must_use]
    pub fn valid() -> Self {
        Self::from_parts(None, TerminationStrategy::NeverStop, Rule::Valid)
    }

    /// A single-rule node with no success payload. Defaults to
    /// `StopAfterFailure`.
    pub fn message(validator: Validator<S>, failure: P) -> Self {
        Self::from_parts(
            None,
            TerminationStrategy::StopAfterFailure,
            Rule::Message {
                validator,
                success: None,
                failure,
            },
        )
    }

    /// A sequential queue using the default composite policy. Defaults to
    /// `StopIfContainsFailure`.
    pub fn queue(children: Vec<Self>) -> Self {
        Self::from_parts(
            None,
            TerminationStrategy::StopIfContainsFailure,
            Rule::Queue {
                children,
                composite: CompositeStrategy::default(),
            },
        )
    }

    /// A cross-field node checking against entries recorded under
    /// `related_key`. Defaults to `StopIfContainsFailure`.
    pub fn related(related_key: K, factory: RelatedValidator<S>, failure: P) -> Self {
        Self::from_parts(
            None,
            TerminationStrategy::StopIfContainsFailure,
            Rule::Related {
                related_key,
                factory,
                success: None,
                failure,
            },
        )
    }

    /// Records this node's state under `key` after each evaluation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_key(mut self, key: K) -> Self {
        self.key = Some(key);
        self
    }

    /// Replaces the termination policy a parent queue consults after this node.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_after(mut self, after: TerminationStrategy<P>) -> Self {
        self.after = after;
        self
    }

    /// Sets the payload returned when the predicate passes.
    ///
    /// Valid and queue nodes have no success payload; for them this is a no-op.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_success(mut self, payload: P) -> Self {
        match &mut self.rule {
            Rule::Message { success, .. } | Rule::Related { success, .. } => {
                *success = Some(payload);
            }
            Rule::Valid | Rule::Queue { .. } => {}
        }
        self
    }

    /// Sets the composite policy of a queue; a no-op for other nodes.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_composite(mut self, strategy: CompositeStrategy<P>) -> Self {
        if let Rule::Queue { composite, .. } = &mut self.rule {
            *composite = strategy;
        }
        self
    }

    /// The key this node records under, if any.
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// The termination policy a parent queue consults after this node.
    pub fn after(&self) -> &TerminationStrategy<P> {
        &self.after
    }

    /// The variant-specific part of this node.
    pub fn rule(&self) -> &Rule<S, K, P> {
        &self.rule
    }
}

impl<S, K, P> Default for Validation<S, K, P> {
    fn default() -> Self {
        Self::valid()
    }
}

impl<S, K, P> Validation<S, K, P>
where
    S: FieldValue + PartialEq + Clone,
    K: PartialEq + Clone + fmt::Debug,
    P: Payload,
{
    /// Evaluates this node against `state`, threading `history` through the
    /// whole subtree.
    ///
    /// If the node has a key, `(key, state)` is appended to `history` after
    /// the node's own result is computed.
    pub fn validate(&self, state: &S, history: &mut History<S, K>) -> Option<P> {
        tracing::trace!(kind = self.rule.kind(), key = ?self.key, "evaluating validation node");

        let result = match &self.rule {
            Rule::Valid => None,
            Rule::Message {
                validator,
                success,
                failure,
            } => evaluate_message(validator, success.as_ref(), failure, state),
            Rule::Queue {
                children,
                composite,
            } => evaluate_queue(children, composite, state, history),
            Rule::Related {
                related_key,
                factory,
                success,
                failure,
            } => self.evaluate_related(
                related_key,
                factory,
                success.as_ref(),
                failure,
                state,
                history,
            ),
        };

        if let Some(key) = &self.key {
            history.record(key.clone(), state.clone());
        }

        result
    }

    /// Evaluates against a fresh, empty history and returns it alongside the
    /// result.
    pub fn validate_fresh(&self, state: &S) -> (Option<P>, History<S, K>) {
        let mut history = History::new();
        let result = self.validate(state, &mut history);
        (result, history)
    }

    // Each matching entry becomes an unkeyed message node carrying this node's
    // `after` and payloads; together they run as a queue with the default
    // composite policy.
    fn evaluate_related(
        &self,
        related_key: &K,
        factory: &RelatedValidator<S>,
        success: Option<&P>,
        failure: &P,
        state: &S,
        history: &mut History<S, K>,
    ) -> Option<P> {
        let checks: Vec<Self> = history
            .matching(related_key)
            .map(|entry| {
                Self::from_parts(
                    None,
                    self.after.clone(),
                    Rule::Message {
                        validator: factory.build(entry),
                        success: success.cloned(),
                        failure: failure.clone(),
                    },
                )
            })
            .collect();

        tracing::trace!(related_key = ?related_key, matches = checks.len(), "related lookup");

        evaluate_queue(&checks, &CompositeStrategy::default(), state, history)
    }
}

fn evaluate_message<S, P>(
    validator: &Validator<S>,
    success: Option<&P>,
    failure: &P,
    state: &S,
) -> Option<P>
where
    S: FieldValue + PartialEq,
    P: Payload,
{
    if validator.is_valid(state) {
        success.cloned()
    } else {
        Some(failure.clone())
    }
}

fn evaluate_queue<S, K, P>(
    children: &[Validation<S, K, P>],
    composite: &CompositeStrategy<P>,
    state: &S,
    history: &mut History<S, K>,
) -> Option<P>
where
    S: FieldValue + PartialEq + Clone,
    K: PartialEq + Clone + fmt::Debug,
    P: Payload,
{
    let mut accumulated = None;

    for (index, child) in children.iter().enumerate() {
        let result = child.validate(state, history);
        accumulated = composite.compose(accumulated, result.clone());

        if child.after.should_stop(result.as_ref()) {
            let skipped = children.len() - index - 1;
            if skipped > 0 {
                tracing::debug!(index, skipped, after = ?child.after, "queue terminated early");
            }
            break;
        }
    }

    accumulated
}
