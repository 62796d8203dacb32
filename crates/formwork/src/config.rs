//! Declarative form definitions
//!
//! Forms can be described in TOML instead of code:
//!
//! ```toml
//! validate_on_input = true
//!
//! [fields.email]
//! validators = [
//!     { kind = "required", message = "Required" },
//!     { kind = "email", message = "Invalid" },
//! ]
//!
//! [fields.password]
//! validators = [{ kind = "min", message = "Too short", threshold = 7 }]
//!
//! [fields.nickname]
//! value = "anon"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::form::{Form, FormOptions};
use crate::schema::{FieldSpec, Schema};
use crate::validators::{self, Validator};

/// A whole form definition
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FormConfig {
    #[serde(default = "default_validate_on_input")]
    pub validate_on_input: bool,
    #[serde(default)]
    pub fields: IndexMap<String, FieldConfig>,
}

fn default_validate_on_input() -> bool {
    true
}

/// One field of a form definition
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FieldConfig {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub validators: Vec<ValidatorConfig>,
}

/// A built-in validator and its parameters
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidatorConfig {
    /// See [`validators::required`]
    Required { message: String },
    /// See [`validators::min`]
    Min { message: String, threshold: usize },
    /// See [`validators::email`]
    Email { message: String },
}

impl ValidatorConfig {
    pub fn build(&self) -> Validator {
        match self {
            ValidatorConfig::Required { message } => validators::required(message.as_str()),
            ValidatorConfig::Min { message, threshold } => {
                validators::min(message.as_str(), *threshold)
            }
            ValidatorConfig::Email { message } => validators::email(message.as_str()),
        }
    }
}

impl FieldConfig {
    pub fn spec(&self) -> FieldSpec {
        let spec = FieldSpec::new().validators(self.validators.iter().map(ValidatorConfig::build));
        match &self.value {
            Some(value) => spec.value(value.as_str()),
            None => spec,
        }
    }
}

impl FormConfig {
    /// Parse a definition from TOML source
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = toml::from_str(source)?;
        if config.fields.is_empty() {
            return Err(ConfigError::Empty);
        }
        Ok(config)
    }

    /// Load a definition from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded form definition");
        Self::from_toml_str(&source)
    }

    /// Build the schema, keeping field declaration order
    pub fn schema(&self) -> Schema {
        self.fields
            .iter()
            .fold(Schema::new(), |schema, (name, field)| {
                schema.field(name.as_str(), field.spec())
            })
    }

    /// Form options described by the definition (no submit handler)
    pub fn options(&self) -> FormOptions {
        FormOptions::new().validate_on_input(self.validate_on_input)
    }

    /// Build a ready-to-use form
    pub fn build_form(&self) -> Form {
        Form::new(self.schema(), self.options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNUP: &str = r#"
        validate_on_input = false

        [fields.email]
        validators = [
            { kind = "required", message = "Required" },
            { kind = "email", message = "Invalid" },
        ]

        [fields.password]
        validators = [{ kind = "min", message = "Too short", threshold = 3 }]

        [fields.nickname]
        value = "anon"
    "#;

    #[test]
    fn test_parse_signup() {
        let config = FormConfig::from_toml_str(SIGNUP).unwrap();

        assert!(!config.validate_on_input);
        assert_eq!(config.fields.len(), 3);
        assert_eq!(
            config.fields["password"].validators,
            vec![ValidatorConfig::Min {
                message: "Too short".into(),
                threshold: 3
            }]
        );
        assert_eq!(config.fields["nickname"].value.as_deref(), Some("anon"));
        assert!(config.fields["nickname"].validators.is_empty());
    }

    #[test]
    fn test_schema_from_config() {
        let schema = FormConfig::from_toml_str(SIGNUP).unwrap().schema();

        let email = schema.get("email").unwrap();
        assert_eq!(email.validator_list().len(), 2);
        assert_eq!(email.check(""), Some("Required".to_string()));
        assert_eq!(email.check("a@b"), Some("Invalid".to_string()));
        assert_eq!(email.check("a@b.com"), None);

        assert_eq!(schema.get("nickname").unwrap().initial_value(), "anon");
    }

    #[test]
    fn test_validate_on_input_defaults_to_true() {
        let config = FormConfig::from_toml_str("[fields.name]\n").unwrap();
        assert!(config.validate_on_input);
        assert!(config.build_form().validates_on_input());
    }

    #[test]
    fn test_empty_definition_rejected() {
        assert!(matches!(
            FormConfig::from_toml_str("validate_on_input = true"),
            Err(ConfigError::Empty)
        ));
    }

    #[test]
    fn test_unknown_validator_kind_rejected() {
        let source = r#"
            [fields.name]
            validators = [{ kind = "max", message = "Too long" }]
        "#;
        assert!(matches!(
            FormConfig::from_toml_str(source),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FormConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
