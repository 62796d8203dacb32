//! Formwork
//!
//! Schema-driven form state: current values, per-field error messages and
//! dirty tracking, driven by input/blur/submit events.
//!
//! - **Schema**: fields with optional defaults and ordered validators
//! - **Stores**: observable values and errors built on `formwork_core`
//! - **Form**: the controller that reacts to events
//! - **Config**: TOML form definitions
//!
//! # Example
//!
//! ```rust
//! use formwork::prelude::*;
//!
//! let schema = Schema::new()
//!     .field("email", FieldSpec::new().validator(required("Required")))
//!     .field("nickname", FieldSpec::new().value("anon"));
//!
//! let mut form = Form::new(
//!     schema,
//!     FormOptions::new().on_submit(|values, _event| {
//!         println!("signing up {}", values["email"]);
//!         Ok(())
//!     }),
//! );
//!
//! let _handle = form.errors().subscribe(|errors| {
//!     println!("errors: {:?}", errors);
//! });
//!
//! form.on_input(&InputEvent::new("email", "a@b.com"))?;
//! let outcome = form.on_submit(&mut SubmitRequest::new())?;
//! assert_eq!(outcome, SubmitOutcome::Handled);
//! # Ok::<(), FormError>(())
//! ```

pub mod config;
pub mod dirty;
pub mod error;
pub mod events;
pub mod form;
pub mod schema;
pub mod validators;


pub use config::{FieldConfig, FormConfig, ValidatorConfig};
pub use dirty::{DirtyTracker, FieldState};
pub use error::{ConfigError, FormError, Result};
pub use events::{InputEvent, SubmitEvent, SubmitRequest};
pub use form::{Form, FormOptions, SubmitHandler, SubmitOutcome};
pub use schema::{FieldSpec, Schema};
pub use validators::Validator;

// Re-export store types
pub use formwork_core::{FieldMap, FieldStore, Store, SubscriptionHandle};

/// Everything needed to declare and drive a form
pub mod prelude {
    pub use crate::error::FormError;
    pub use crate::events::{InputEvent, SubmitEvent, SubmitRequest};
    pub use crate::form::{Form, FormOptions, SubmitOutcome};
    pub use crate::schema::{FieldSpec, Schema};
    pub use crate::validators::{email, min, required, validator, Validator};
    pub use formwork_core::FieldMap;
}
