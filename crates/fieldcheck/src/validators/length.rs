//! Length checks
//!
//! Text is measured in Unicode scalar values, collections in elements. A state
//! with no defined length (a number, a boolean, a domain type) fails every
//! length check instead of raising.

use crate::foundation::FieldValue;

/// `len(state) == length`.
#[must_use]
pub fn has_exact_length<S: FieldValue + ?Sized>(state: &S, length: usize) -> bool {
    state.measured_length().is_some_and(|len| len == length)
}

/// `len(state) >= min`.
#[must_use]
pub fn has_min_length<S: FieldValue + ?Sized>(state: &S, min: usize) -> bool {
    state.measured_length().is_some_and(|len| len >= min)
}

/// `len(state) <= max`.
#[must_use]
pub fn has_max_length<S: FieldValue + ?Sized>(state: &S, max: usize) -> bool {
    state.measured_length().is_some_and(|len| len <= max)
}
