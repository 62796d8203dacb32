//! Dirty (touched) field tracking
//!
//! A field starts [`FieldState::Pristine`] and becomes [`FieldState::Dirty`]
//! the first time it is blurred. The transition is one-way: there is no way
//! to mark a field clean again for the lifetime of a form.

use rustc_hash::FxHashSet;

/// Interaction state of a single field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldState {
    /// Never blurred
    #[default]
    Pristine,
    /// Blurred at least once
    Dirty,
}

/// Set of fields that have been blurred at least once
#[derive(Clone, Debug, Default)]
pub struct DirtyTracker {
    fields: FxHashSet<String>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    /// Mark a field dirty
    ///
    /// Returns `true` if the field was pristine until now.
    pub fn mark_dirty(&mut self, name: &str) -> bool {
        if self.fields.contains(name) {
            return false;
        }
        self.fields.insert(name.to_string())
    }

    pub fn state(&self, name: &str) -> FieldState {
        if self.is_dirty(name) {
            FieldState::Dirty
        } else {
            FieldState::Pristine
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
