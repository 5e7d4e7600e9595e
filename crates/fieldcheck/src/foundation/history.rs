//! The append-only record of states seen during one evaluation pass
//!
//! Every node that carries a key records `(key, state)` here after it has
//! produced its own result. Related nodes evaluated later in the same pass look
//! entries up by key, so visibility follows evaluation order: an entry is seen
//! by every node evaluated after the append and by nothing evaluated before it.
//!
//! [`History`] only exposes appending operations. Entries are never removed or
//! reordered.

use std::slice;

// ============================================================================
// VALIDATOR TARGET
// ============================================================================

/// Something that holds a state a dependent predicate can be bound to.
///
/// [`ValidationState`] is the implementation used by related nodes, but any
/// type exposing a state can serve as the target of a
/// [`RelatedValidator`](crate::validators::RelatedValidator).
pub trait ValidatorTarget<S> {
    /// The held state.
    fn state(&self) -> &S;
}

// ============================================================================
// VALIDATION STATE
// ============================================================================

/// A recorded `(key, state)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationState<S, K> {
    key: K,
    state: S,
}

impl<S, K> ValidationState<S, K> {
    /// Creates a new entry.
    pub fn new(key: K, state: S) -> Self {
        Self { key, state }
    }

    /// The key the state was recorded under.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the entry, returning its parts.
    pub fn into_parts(self) -> (K, S) {
        (self.key, self.state)
    }
}

impl<S, K> ValidatorTarget<S> for ValidationState<S, K> {
    fn state(&self) -> &S {
        &self.state
    }
}

// ============================================================================
// HISTORY
// ============================================================================

/// Ordered, append-only log shared by one top-level `validate` call.
///
/// The caller owns the history and passes it by mutable reference into the
/// tree; each keyed node appends to it exactly once per evaluation. A history
/// normally starts empty for each logical submission attempt, but it can be
/// pre-seeded with [`History::record`] when some fields were validated
/// elsewhere.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldcheck::foundation::History;
///
/// let mut history = History::new();
/// history.record("password", "hunter22".to_string());
/// assert_eq!(history.matching(&"password").count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<S, K> {
    entries: Vec<ValidationState<S, K>>,
}

impl<S, K> History<S, K> {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty history with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry.
    pub fn record(&mut self, key: K, state: S) {
        self.push(ValidationState::new(key, state));
    }

    /// Appends an already constructed entry.
    pub fn push(&mut self, entry: ValidationState<S, K>) {
        self.entries.push(entry);
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in recording order.
    pub fn iter(&self) -> slice::Iter<'_, ValidationState<S, K>> {
        self.entries.iter()
    }

    /// All recorded entries, oldest first.
    pub fn as_slice(&self) -> &[ValidationState<S, K>] {
        &self.entries
    }
}

impl<S, K: PartialEq> History<S, K> {
    /// Iterates entries recorded under `key`, in recording order.
    pub fn matching<'a>(
        &'a self,
        key: &'a K,
    ) -> impl Iterator<Item = &'a ValidationState<S, K>> + 'a {
        self.entries.iter().filter(move |entry| entry.key == *key)
    }

    /// The most recent entry recorded under `key`.
    pub fn latest(&self, key: &K) -> Option<&ValidationState<S, K>> {
        self.entries.iter().rev().find(|entry| entry.key == *key)
    }
}

impl<S, K> Default for History<S, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, K> Extend<ValidationState<S, K>> for History<S, K> {
    fn extend<I: IntoIterator<Item = ValidationState<S, K>>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<S, K> FromIterator<ValidationState<S, K>> for History<S, K> {
    fn from_iter<I: IntoIterator<Item = ValidationState<S, K>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<S, K> FromIterator<(K, S)> for History<S, K> {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(key, state)| ValidationState::new(key, state))
            .collect()
    }
}

impl<'a, S, K> IntoIterator for &'a History<S, K> {
    type Item = &'a ValidationState<S, K>;
    type IntoIter = slice::Iter<'a, ValidationState<S, K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
