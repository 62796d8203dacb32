//! Form controller
//!
//! [`Form`] owns a [`Schema`], a values store, an errors store and a dirty
//! tracker, and turns input/blur/submit events into store updates.
//!
//! # Field lifecycle
//!
//! ```text
//!            input (arms blur binding)        blur (binding armed)
//! Pristine ─────────────────────────▶ Pristine ───────────────────▶ Dirty
//!    │                                                                │
//!    └─ input never validates                input revalidates ◀──────┘
//!                                            (validate_on_input)
//! ```
//!
//! Typing into a pristine field only arms its blur binding; the field turns
//! dirty on the next blur. A blur on a field that was never typed into is
//! ignored. Once dirty, every input revalidates the field when
//! `validate_on_input` is on, and every blur revalidates it regardless.
//!
//! # Example
//!
//! ```rust
//! use formwork::prelude::*;
//!
//! let schema = Schema::new().field(
//!     "email",
//!     FieldSpec::new()
//!         .validator(required("Required"))
//!         .validator(email("Invalid")),
//! );
//! let mut form = Form::new(schema, FormOptions::default());
//!
//! form.on_input(&InputEvent::new("email", "a@b"))?;
//! form.on_blur(&InputEvent::new("email", "a@b"))?;
//! assert_eq!(form.errors().get_field("email"), Some(Some("Invalid".to_string())));
//!
//! form.on_input(&InputEvent::new("email", "a@b.com"))?;
//! assert_eq!(form.errors().get_field("email"), Some(None));
//!
//! let mut request = SubmitRequest::new();
//! assert_eq!(form.on_submit(&mut request)?, SubmitOutcome::Submitted);
//! assert!(request.was_submitted());
//! # Ok::<(), formwork::FormError>(())
//! ```

use formwork_core::{FieldMap, FieldStore};
use rustc_hash::FxHashSet;

use crate::dirty::{DirtyTracker, FieldState};
use crate::error::{FormError, Result};
use crate::events::{InputEvent, SubmitEvent};
use crate::schema::{FieldSpec, Schema};

/// Callback run with the validated values when a valid form is submitted
pub type SubmitHandler =
    Box<dyn FnMut(&FieldMap<String>, &mut dyn SubmitEvent) -> anyhow::Result<()> + Send>;

/// Construction options for a [`Form`]
pub struct FormOptions {
    validate_on_input: bool,
    submit_handler: Option<SubmitHandler>,
}

impl FormOptions {
    /// Default options: validate on input, no submit handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether input events revalidate dirty fields
    pub fn validate_on_input(mut self, enabled: bool) -> Self {
        self.validate_on_input = enabled;
        self
    }

    /// Handle valid submissions instead of performing the default submission
    pub fn on_submit<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&FieldMap<String>, &mut dyn SubmitEvent) -> anyhow::Result<()> + Send + 'static,
    {
        self.submit_handler = Some(Box::new(handler));
        self
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_on_input: true,
            submit_handler: None,
        }
    }
}

impl std::fmt::Debug for FormOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormOptions")
            .field("validate_on_input", &self.validate_on_input)
            .field("submit_handler", &self.submit_handler.is_some())
            .finish()
    }
}

/// What [`Form::on_submit`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// At least one field failed validation; nothing was submitted
    Invalid,
    /// The submit handler ran
    Handled,
    /// The event's default submission ran
    Submitted,
}

/// Form controller
pub struct Form {
    schema: Schema,
    values: FieldStore<String>,
    errors: FieldStore<Option<String>>,
    dirty: DirtyTracker,
    /// Fields whose blur binding was armed by an input event
    blur_bindings: FxHashSet<String>,
    validate_on_input: bool,
    submit_handler: Option<SubmitHandler>,
}

impl Form {
    /// Create a form; every field starts pristine with its default value and no error
    pub fn new(schema: Schema, options: FormOptions) -> Self {
        let values = FieldStore::new(schema.initial_values());
        let errors = FieldStore::new(schema.initial_errors());

        tracing::debug!(
            fields = schema.len(),
            validate_on_input = options.validate_on_input,
            "form created"
        );

        Self {
            schema,
            values,
            errors,
            dirty: DirtyTracker::new(),
            blur_bindings: FxHashSet::default(),
            validate_on_input: options.validate_on_input,
            submit_handler: options.submit_handler,
        }
    }

    // =========================================================================
    // STORES & STATE
    // =========================================================================

    /// Current field values
    pub fn values(&self) -> &FieldStore<String> {
        &self.values
    }

    /// Current error message per field, `None` when the field is valid
    pub fn errors(&self) -> &FieldStore<Option<String>> {
        &self.errors
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn validates_on_input(&self) -> bool {
        self.validate_on_input
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.dirty.is_dirty(name)
    }

    /// Interaction state of a field, `None` for unknown fields
    pub fn field_state(&self, name: &str) -> Option<FieldState> {
        self.schema
            .contains(name)
            .then(|| self.dirty.state(name))
    }

    /// Dirty fields in schema order
    pub fn dirty_fields(&self) -> Vec<&str> {
        self.schema
            .names()
            .filter(|name| self.dirty.is_dirty(name))
            .collect()
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Whether the field exists and declares at least one validator
    pub fn has_validators(&self, name: &str) -> bool {
        self.schema.get(name).is_some_and(FieldSpec::has_validators)
    }

    /// Validate one field against `value` and record the outcome
    ///
    /// The first failing validator's message is written to the errors store;
    /// if all pass the field's error is cleared. Returns whether the value is
    /// valid.
    pub fn validate(&self, name: &str, value: &str) -> Result<bool> {
        let spec = self.field_spec(name)?;
        let error = spec.check(value);
        let valid = error.is_none();

        tracing::trace!(field = name, valid, "field validated");
        self.errors.update_field(name, error);
        Ok(valid)
    }

    /// Validate every field of `snapshot` that has validators
    ///
    /// Every validated field has its error refreshed, so errors from earlier
    /// runs are replaced or cleared. Fields without validators are skipped
    /// and keep their current error. Returns whether all fields are valid.
    pub fn validate_all(&self, snapshot: &FieldMap<String>) -> Result<bool> {
        if let Some(unknown) = snapshot.keys().find(|name| !self.schema.contains(name)) {
            return Err(self.unknown_field(unknown));
        }

        let mut form_valid = true;
        for (name, value) in snapshot {
            if self.has_validators(name) && !self.validate(name, value)? {
                form_valid = false;
            }
        }
        Ok(form_valid)
    }

    // =========================================================================
    // EVENT HANDLERS
    // =========================================================================

    /// Handle an input event
    ///
    /// Stores the new value. A pristine field gets its blur binding armed;
    /// a dirty field is revalidated when `validate_on_input` is on.
    pub fn on_input(&mut self, event: &InputEvent) -> Result<()> {
        let name = event.field_name.as_str();
        self.field_spec(name)?;

        if !self.dirty.is_dirty(name) && self.blur_bindings.insert(name.to_string()) {
            tracing::trace!(field = name, "blur binding armed");
        }

        self.values.update_field(name, event.field_value.clone());

        if self.validate_on_input && self.has_validators(name) && self.dirty.is_dirty(name) {
            self.validate(name, &event.field_value)?;
        }
        Ok(())
    }

    /// Handle a blur event
    ///
    /// Only fields whose blur binding was armed by an earlier input react:
    /// they become dirty and, if they have validators, are validated against
    /// the event's value. Returns whether the blur was handled.
    pub fn on_blur(&mut self, event: &InputEvent) -> Result<bool> {
        let name = event.field_name.as_str();
        self.field_spec(name)?;

        if !self.blur_bindings.contains(name) {
            return Ok(false);
        }

        if self.dirty.mark_dirty(name) {
            tracing::debug!(field = name, "field marked dirty");
        }

        if self.has_validators(name) {
            self.validate(name, &event.field_value)?;
        }
        Ok(true)
    }

    /// Handle a submit event
    ///
    /// Suppresses the event's default action, validates a snapshot of the
    /// values store and, when everything is valid, hands the snapshot to the
    /// submit handler or falls back to the event's default submission.
    pub fn on_submit(&mut self, event: &mut dyn SubmitEvent) -> Result<SubmitOutcome> {
        event.prevent_default();

        let snapshot = self.values.get();
        if !self.validate_all(&snapshot)? {
            tracing::debug!("submit blocked by validation errors");
            return Ok(SubmitOutcome::Invalid);
        }

        match self.submit_handler.as_mut() {
            Some(handler) => {
                handler(&snapshot, event).map_err(FormError::SubmitHandler)?;
                tracing::debug!("submit handled");
                Ok(SubmitOutcome::Handled)
            }
            None => {
                event.submit();
                tracing::debug!("default submission performed");
                Ok(SubmitOutcome::Submitted)
            }
        }
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn field_spec(&self, name: &str) -> Result<&FieldSpec> {
        self.schema.get(name).ok_or_else(|| self.unknown_field(name))
    }

    fn unknown_field(&self, name: &str) -> FormError {
        tracing::warn!(field = name, "event for field not declared in schema");
        FormError::UnknownField(name.to_string())
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("schema", &self.schema)
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("dirty", &self.dirty)
            .field("validate_on_input", &self.validate_on_input)
            .finish()
    }
}
