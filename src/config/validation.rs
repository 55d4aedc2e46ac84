use tracing_subscriber::EnvFilter;

use crate::config::models::{FactorySettings, LoggingSettings, SwitchyardConfig};

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Switchyard configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the entire configuration
    pub fn validate(config: &SwitchyardConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(mut factory_errors) = Self::validate_factory(&config.factory) {
            errors.append(&mut factory_errors);
        }

        if let Err(e) = Self::validate_logging(&config.logging) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            })
        }
    }

    fn validate_factory(factory: &FactorySettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let area = factory.builtin_area.trim_matches('/');

        // The built-in area only matters when built-ins are registered
        if factory.register_builtins {
            if area.is_empty() {
                errors.push(ValidationError::MissingField {
                    field: "factory.builtin_area".to_string(),
                });
            } else if area.split('/').any(str::is_empty) {
                errors.push(ValidationError::InvalidField {
                    field: "factory.builtin_area".to_string(),
                    message: format!("area '{}' contains an empty segment", factory.builtin_area),
                });
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    fn validate_logging(logging: &LoggingSettings) -> ValidationResult<()> {
        EnvFilter::try_new(&logging.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: e.to_string(),
            })
    }

    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        if errors.len() == 1 {
            return errors[0].to_string();
        }

        let mut message = format!("Found {} configuration errors:\n", errors.len());
        for (i, error) in errors.iter().enumerate() {
            message.push_str(&format!("  {}. {}\n", i + 1, error));
        }
        message
    }
}
