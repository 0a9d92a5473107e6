//! Single-assignment completion slot.

use once_cell::sync::OnceCell;

/// Holds the outcome of an operation that may be completed from several
/// places; only the first completion is kept.
#[derive(Debug)]
pub struct CompletionGate<T> {
    slot: OnceCell<T>,
}

impl<T> CompletionGate<T> {
    /// Create an open gate
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Try to complete with `value`.
    ///
    /// Returns `true` if this call completed the gate, `false` if it was
    /// already complete (the value is dropped).
    pub fn complete(&self, value: T) -> bool {
        self.slot.set(value).is_ok()
    }

    /// Whether a value has been stored
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slot.get().is_some()
    }

    /// The stored value, if any
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Take the stored value
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_inner()
    }
}

impl<T> Default for CompletionGate<T> {
    fn default() -> Self {
        Self::new()
    }
}
