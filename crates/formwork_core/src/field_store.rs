//! Keyed field store
//!
//! [`FieldStore<V>`] is a [`Store`] over an insertion-ordered map from field
//! name to `V`, with [`FieldStore::update_field`] for merging a single key.
//! All `Store` methods are available through `Deref`.

use indexmap::IndexMap;
use std::ops::Deref;

use crate::store::Store;

/// Mapping held by a [`FieldStore`]
pub type FieldMap<V> = IndexMap<String, V>;

/// A store of per-field values
pub struct FieldStore<V: Clone + Send + Sync + 'static> {
    inner: Store<FieldMap<V>>,
}

impl<V: Clone + Send + Sync + 'static> FieldStore<V> {
    /// Create a field store from an initial mapping
    pub fn new(initial: FieldMap<V>) -> Self {
        Self {
            inner: Store::new(initial),
        }
    }

    /// Create a field store with one entry per name, all set to `value`
    pub fn from_keys<'a, I>(names: I, value: V) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let initial = names
            .into_iter()
            .map(|name| (name.to_string(), value.clone()))
            .collect();
        Self::new(initial)
    }

    /// Set one field, keeping every other entry, and notify subscribers
    pub fn update_field(&self, name: &str, value: V) {
        self.inner.update(|fields| {
            fields.insert(name.to_string(), value);
        });
    }

    /// Get a copy of one field's value
    pub fn get_field(&self, name: &str) -> Option<V> {
        self.inner.with(|fields| fields.get(name).cloned())
    }

    /// Check if a field exists
    pub fn contains(&self, name: &str) -> bool {
        self.inner.with(|fields| fields.contains_key(name))
    }

    /// Field names in insertion order
    pub fn keys(&self) -> Vec<String> {
        self.inner.with(|fields| fields.keys().cloned().collect())
    }
}

impl<V: Clone + Send + Sync + 'static> Deref for FieldStore<V> {
    type Target = Store<FieldMap<V>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<V: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for FieldStore<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FieldStore").field(&self.inner).finish()
    }
}
