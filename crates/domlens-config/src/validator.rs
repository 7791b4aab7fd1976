//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_model(config, &mut result);
        Self::validate_stamping(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_model(config: &Config, result: &mut ValidationResult) {
        let model = &config.model;

        if model.provider != "gemini" {
            result.add_error(ValidationError::new(
                "model.provider",
                format!("Unknown provider '{}', valid values: [\"gemini\"]", model.provider),
            ));
        }

        if model.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "model.api_key",
                "API key is not set, LLM-backed queries will fail",
            ));
        }

        if let Some(ref url) = model.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_error(ValidationError::new(
                    "model.base_url",
                    "base_url must start with http:// or https://",
                ));
            }
        }

        if model.model.is_empty() {
            result.add_error(ValidationError::new("model.model", "Model name cannot be empty"));
        }

        if model.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "model.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if let Some(t) = model.temperature {
            if !(0.0..=2.0).contains(&t) {
                result.add_error(ValidationError::new(
                    "model.temperature",
                    "temperature must be between 0.0 and 2.0",
                ));
            }
        }
    }

    fn validate_stamping(config: &Config, result: &mut ValidationResult) {
        let length = config.stamping.address_length;
        if length == 0 {
            result.add_error(ValidationError::new(
                "stamping.address_length",
                "address_length must be greater than 0",
            ));
        } else if length < 3 {
            result.add_warning(ValidationWarning::new(
                "stamping.address_length",
                "address_length below 3 grows on most pages, consider 3 or more",
            ));
        } else if length > 8 {
            result.add_warning(ValidationWarning::new(
                "stamping.address_length",
                "long addresses inflate the compacted payload",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new("logging.level", "Log level cannot be empty"));
        }

        if config.logging.file_prefix.is_empty() {
            result.add_error(ValidationError::new(
                "logging.file_prefix",
                "file_prefix cannot be empty",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
