//! The `required` check
//!
//! What "present" means depends on the state type; see
//! [`FieldValue::satisfies_required`].
//!
//! | State | Passes when |
//! |---|---|
//! | text, collection | non-empty |
//! | `bool` | `true` |
//! | `Option<bool>`, `Option<&bool>` | always |
//! | `Option<T>` | `Some(v)` and `v` passes |
//! | anything else | always |

use crate::foundation::FieldValue;

/// Returns true if `state` counts as filled in.
#[must_use]
pub fn is_present<S: FieldValue + ?Sized>(state: &S) -> bool {
    state.satisfies_required()
}
