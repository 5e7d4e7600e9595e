//! Core types shared by every part of the engine
//!
//! - **Errors**: [`RuleError`] for fallible rule construction
//! - **State inspection**: [`FieldValue`], the type switch leaf predicates use
//! - **History**: [`History`], [`ValidationState`] and the [`ValidatorTarget`]
//!   capability
//!
//! Evaluation itself is infallible. A rule that cannot measure its input
//! resolves to "invalid" instead of raising, and errors only surface while a
//! tree is being put together (bad regex, malformed schema).

pub mod error;
pub mod history;
pub mod value;

pub use error::RuleError;
pub use history::{History, ValidationState, ValidatorTarget};
pub use value::FieldValue;
