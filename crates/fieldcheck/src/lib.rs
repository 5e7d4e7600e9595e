//! # fieldcheck
//!
//! A composable rule-evaluation engine for validating a single piece of state
//! (typically a form field value) against a tree of rules, producing a
//! severity-tagged payload.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldcheck::prelude::*;
//!
//! let password = Validation::queue(vec![
//!     Validation::message(Validator::required(), UiPayload::failure("Required")),
//!     Validation::message(Validator::min_length(8), UiPayload::failure("Too short")),
//! ])
//! .with_key("password".to_string());
//!
//! let confirm = Validation::related(
//!     "password".to_string(),
//!     RelatedValidator::IsSameAs,
//!     UiPayload::failure("Passwords do not match"),
//! );
//!
//! let mut history = History::new();
//! password.validate(&"hunter22".to_string(), &mut history);
//! let result = confirm.validate(&"hunter2".to_string(), &mut history);
//! assert!(result.is_some_and(|p| p.severity() == Severity::Failure));
//! ```
//!
//! ## Building Blocks
//!
//! - **Predicates**: [`Validator`](validators::Validator): required, length,
//!   pattern, equality and custom checks.
//! - **Related predicates**: [`RelatedValidator`](validators::RelatedValidator)
//!   builds a predicate bound to a previously recorded state.
//! - **Policies**: [`TerminationStrategy`](validation::TerminationStrategy) and
//!   [`CompositeStrategy`](payload::CompositeStrategy).
//! - **History**: [`History`](foundation::History): the append-only log shared
//!   by one evaluation pass.
//! - **Tree**: [`Validation`](validation::Validation): the node type and the
//!   recursive `validate` traversal.

pub mod foundation;
pub mod payload;
pub mod prelude;
pub mod schema;
pub mod validation;
pub mod validators;
