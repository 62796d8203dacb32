//! Form schema
//!
//! A [`Schema`] lists the fields of a form in declaration order. Each field
//! has a [`FieldSpec`]: an optional default value and an ordered list of
//! validators where the first failing validator decides the error message.
//!
//! ```rust
//! use formwork::schema::{FieldSpec, Schema};
//! use formwork::validators::{email, required};
//!
//! let schema = Schema::new()
//!     .field(
//!         "email",
//!         FieldSpec::new()
//!             .validator(required("Required"))
//!             .validator(email("Invalid")),
//!     )
//!     .field("nickname", FieldSpec::new().value("anon"));
//!
//! assert_eq!(schema.len(), 2);
//! assert_eq!(schema.initial_values()["nickname"], "anon");
//! ```

use formwork_core::FieldMap;
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::validators::Validator;

/// Default value and validators for one field
#[derive(Clone, Default)]
pub struct FieldSpec {
    value: Option<String>,
    validators: SmallVec<[Validator; 4]>,
}

impl FieldSpec {
    /// Create an empty field spec: no default, no validators
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default value
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Append a validator; validators run in the order they were added
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Append several validators
    pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// The value the field starts with; an empty default counts as none
    pub fn initial_value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// Declared validators in run order
    pub fn validator_list(&self) -> &[Validator] {
        &self.validators
    }

    pub fn has_validators(&self) -> bool {
        !self.validators.is_empty()
    }

    /// Run validators in order, returning the first error message
    pub fn check(&self, value: &str) -> Option<String> {
        self.validators.iter().enumerate().find_map(|(index, validator)| {
            let result = validator(value);
            tracing::trace!(index, failed = result.is_some(), "validator ran");
            result
        })
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("value", &self.value)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Ordered set of named fields
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: IndexMap<String, FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field
    ///
    /// Names are unique: declaring a name twice replaces the earlier spec but
    /// keeps its original position.
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Add a field in place
    pub fn insert(&mut self, name: impl Into<String>, spec: FieldSpec) {
        self.fields.insert(name.into(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> + '_ {
        self.fields.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Starting contents of the values store
    pub fn initial_values(&self) -> FieldMap<String> {
        self.iter()
            .map(|(name, spec)| (name.to_string(), spec.initial_value().to_string()))
            .collect()
    }

    /// Starting contents of the errors store: no error for every field
    pub fn initial_errors(&self) -> FieldMap<Option<String>> {
        self.names().map(|name| (name.to_string(), None)).collect()
    }
}
