//! Common imports.
//!
//! ```rust,ignore
//! use fieldcheck::prelude::*;
//! ```

pub use crate::foundation::{FieldValue, History, RuleError, ValidationState, ValidatorTarget};
pub use crate::payload::{CompositeStrategy, Payload, Severity, UiPayload};
pub use crate::validation::{Rule, SeverityFlags, TerminationStrategy, Validation};
pub use crate::validators::{RelatedValidator, Validator};
