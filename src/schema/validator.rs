//! Worksheet validation against the embedded JSON schema

use miette::Diagnostic;
use thiserror::Error;

use crate::entities::{InputError, Worksheet};
use crate::schema::registry::{SchemaRegistry, WORKSHEET_SCHEMA};
use crate::yaml::{parse_yaml, YamlError};

/// The schema itself could not be loaded
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("schema '{0}' is not embedded in this build")]
    #[diagnostic(code(pricecalc::schema::missing))]
    Missing(String),

    #[error("schema '{name}' is invalid: {message}")]
    #[diagnostic(code(pricecalc::schema::invalid))]
    Invalid { name: String, message: String },
}

/// One schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value ("" for the document root)
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A worksheet failed validation
#[derive(Debug, Error, Diagnostic)]
pub enum ValidationError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Yaml(#[from] YamlError),

    #[error("{filename} has {} schema violation(s)", .violations.len())]
    #[diagnostic(code(pricecalc::schema::violation))]
    Schema {
        filename: String,
        violations: Vec<Violation>,
        #[help]
        details: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Input(#[from] InputError),
}

impl ValidationError {
    /// Number of individual problems behind this error
    pub fn violation_count(&self) -> usize {
        match self {
            ValidationError::Schema { violations, .. } => violations.len(),
            _ => 1,
        }
    }
}

/// Validates worksheet text: YAML syntax, schema, then boundary rules
pub struct Validator {
    schema: jsonschema::Validator,
}

impl Validator {
    pub fn new(registry: &SchemaRegistry) -> Result<Self, SchemaError> {
        let raw = registry
            .get(WORKSHEET_SCHEMA)
            .ok_or_else(|| SchemaError::Missing(WORKSHEET_SCHEMA.to_string()))?;

        let invalid = |message: String| SchemaError::Invalid {
            name: WORKSHEET_SCHEMA.to_string(),
            message,
        };

        let schema_json: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        let schema = jsonschema::validator_for(&schema_json).map_err(|e| invalid(e.to_string()))?;

        Ok(Self { schema })
    }

    /// Validate worksheet content and return the parsed worksheet
    ///
    /// `max_margin` is the configured target margin ceiling, which may be
    /// tighter than the schema's limit of 1.
    pub fn validate(
        &self,
        content: &str,
        filename: &str,
        max_margin: f64,
    ) -> Result<Worksheet, ValidationError> {
        let instance: serde_json::Value = parse_yaml(content, filename)?;

        let violations: Vec<Violation> = self
            .schema
            .iter_errors(&instance)
            .map(|e| Violation {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if !violations.is_empty() {
            let details = violations
                .iter()
                .map(|v| format!("- {}", v))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(ValidationError::Schema {
                filename: filename.to_string(),
                violations,
                details,
            });
        }

        let sheet = Worksheet::parse(content, filename)?;
        sheet.validate(max_margin)?;
        Ok(sheet)
    }
}
