//! State inspection for leaf predicates
//!
//! Leaf predicates are generic over the state type, but several of them only
//! make sense for text or collections. [`FieldValue`] is the type switch they
//! dispatch through: a state type reports whether it is textual, whether it is
//! a counted collection, and what "required" means for it.
//!
//! Every hook has a default, so a domain type opts in with an empty impl and
//! gets "other type" semantics: it is always present, has no length and never
//! matches a pattern.
//!
//! ```rust,ignore
//! use fieldcheck::foundation::FieldValue;
//!
//! #[derive(Clone, PartialEq)]
//! struct Country(&'static str);
//!
//! impl FieldValue for Country {}
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

// ============================================================================
// FIELD VALUE TRAIT
// ============================================================================

/// Describes how a state value looks to the built-in leaf predicates.
pub trait FieldValue {
    /// Returns the textual content, if this value is text.
    ///
    /// Pattern predicates only ever look at this. A value without text fails
    /// both allow- and deny-patterns.
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// Returns the number of elements, if this value is a collection.
    fn element_count(&self) -> Option<usize> {
        None
    }

    /// Whether this value satisfies a `required` check.
    ///
    /// Text and collections must be non-empty, booleans must be `true`, and
    /// everything else is present by virtue of existing.
    fn satisfies_required(&self) -> bool {
        true
    }

    /// Whether `Option<Self>` passes `required` unconditionally, `None`
    /// included. Only `bool` sets this; references and `Cow` forward it.
    const NULLABLE_ALWAYS_REQUIRED: bool = false;

    /// The `required` check for `Option<Self>`.
    ///
    /// An optional value must be `Some` and satisfy the inner check, unless
    /// [`NULLABLE_ALWAYS_REQUIRED`](Self::NULLABLE_ALWAYS_REQUIRED) is set.
    fn nullable_required(value: Option<&Self>) -> bool
    where
        Self: Sized,
    {
        Self::NULLABLE_ALWAYS_REQUIRED || value.is_some_and(Self::satisfies_required)
    }

    /// Length used by the length predicates.
    ///
    /// Text is measured in Unicode scalar values, collections in elements.
    /// `None` means the value has no defined length.
    fn measured_length(&self) -> Option<usize> {
        match self.as_text() {
            Some(text) => Some(text.chars().count()),
            None => self.element_count(),
        }
    }
}

// ============================================================================
// TEXT
// ============================================================================

impl FieldValue for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }

    fn satisfies_required(&self) -> bool {
        !self.is_empty()
    }
}

impl FieldValue for String {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }

    fn satisfies_required(&self) -> bool {
        !self.is_empty()
    }
}

impl<B> FieldValue for Cow<'_, B>
where
    B: FieldValue + ToOwned + ?Sized,
{
    const NULLABLE_ALWAYS_REQUIRED: bool = B::NULLABLE_ALWAYS_REQUIRED;

    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }

    fn element_count(&self) -> Option<usize> {
        (**self).element_count()
    }

    fn satisfies_required(&self) -> bool {
        (**self).satisfies_required()
    }
}

impl<T> FieldValue for &T
where
    T: FieldValue + ?Sized,
{
    const NULLABLE_ALWAYS_REQUIRED: bool = T::NULLABLE_ALWAYS_REQUIRED;

    fn as_text(&self) -> Option<&str> {
        (**self).as_text()
    }

    fn element_count(&self) -> Option<usize> {
        (**self).element_count()
    }

    fn satisfies_required(&self) -> bool {
        (**self).satisfies_required()
    }
}

// ============================================================================
// BOOLEAN
// ============================================================================

impl FieldValue for bool {
    const NULLABLE_ALWAYS_REQUIRED: bool = true;

    fn satisfies_required(&self) -> bool {
        *self
    }
}

// ============================================================================
// NULLABLE
// ============================================================================

impl<T: FieldValue> FieldValue for Option<T> {
    fn as_text(&self) -> Option<&str> {
        self.as_ref().and_then(T::as_text)
    }

    fn element_count(&self) -> Option<usize> {
        self.as_ref().and_then(T::element_count)
    }

    fn satisfies_required(&self) -> bool {
        T::nullable_required(self.as_ref())
    }
}

// ============================================================================
// COLLECTIONS
// ============================================================================

macro_rules! impl_collection_field_value {
    ($($ty:ty => [$($gen:tt)*]),* $(,)?) => {
        $(
            impl<$($gen)*> FieldValue for $ty {
                fn element_count(&self) -> Option<usize> {
                    Some(self.len())
                }

                fn satisfies_required(&self) -> bool {
                    !self.is_empty()
                }
            }
        )*
    };
}

impl_collection_field_value! {
    [T] => [T],
    Vec<T> => [T],
    VecDeque<T> => [T],
    HashSet<T, H> => [T, H],
    BTreeSet<T> => [T],
    HashMap<K, V, H> => [K, V, H],
    BTreeMap<K, V> => [K, V],
}

impl<T, const N: usize> FieldValue for [T; N] {
    fn element_count(&self) -> Option<usize> {
        Some(N)
    }

    fn satisfies_required(&self) -> bool {
        N > 0
    }
}

// ============================================================================
// OPAQUE SCALARS
// ============================================================================

macro_rules! impl_opaque_field_value {
    ($($ty:ty),* $(,)?) => {
        $(impl FieldValue for $ty {})*
    };
}

impl_opaque_field_value!(
    char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

// ============================================================================
// JSON
// ============================================================================

impl FieldValue for serde_json::Value {
    fn as_text(&self) -> Option<&str> {
        self.as_str()
    }

    fn element_count(&self) -> Option<usize> {
        self.as_array().map(Vec::len)
    }

    fn satisfies_required(&self) -> bool {
        match self {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Array(items) => !items.is_empty(),
            serde_json::Value::Number(_) | serde_json::Value::Object(_) => true,
        }
    }
}
