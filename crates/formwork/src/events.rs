//! Events delivered to a form by the binding layer

/// An input or blur on a named field, carrying the field's current value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub field_name: String,
    pub field_value: String,
}

impl InputEvent {
    pub fn new(field_name: impl Into<String>, field_value: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_value: field_value.into(),
        }
    }
}

/// A form submission
///
/// The form always calls [`SubmitEvent::prevent_default`] first. It calls
/// [`SubmitEvent::submit`] only when the form is valid and no submit handler
/// was configured.
pub trait SubmitEvent {
    /// Suppress the host's built-in submission
    fn prevent_default(&mut self);

    /// Perform the host's built-in submission
    fn submit(&mut self);
}

/// A [`SubmitEvent`] that records what the form asked of it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitRequest {
    default_prevented: bool,
    submitted: bool,
}

impl SubmitRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether the built-in submission was performed
    pub fn was_submitted(&self) -> bool {
        self.submitted
    }
}

impl SubmitEvent for SubmitRequest {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    fn submit(&mut self) {
        self.submitted = true;
    }
}
