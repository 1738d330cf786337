use thiserror::Error;

use crate::config::{GenerationSettings, RateLimitConfig, ServerSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        Self::validate_server(&settings.server, &mut errors);
        Self::validate_generation(&settings.generation, &mut errors);
        if let Some(rate_limit) = &settings.rate_limit {
            Self::validate_rate_limit(rate_limit, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings, errors: &mut Vec<ValidationError>) {
        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::invalid(
                "server.port",
                "Port must be greater than 0",
            ));
        }
    }

    fn validate_generation(generation: &GenerationSettings, errors: &mut Vec<ValidationError>) {
        if generation.max_amount == 0 {
            errors.push(ValidationError::invalid(
                "generation.max_amount",
                "Must be greater than 0",
            ));
        }

        if generation.default_amount == 0 || generation.default_amount > generation.max_amount {
            errors.push(ValidationError::invalid(
                "generation.default_amount",
                format!("Must be between 1 and {}", generation.max_amount),
            ));
        }

        if generation.max_repeat == 0 {
            errors.push(ValidationError::invalid(
                "generation.max_repeat",
                "Must be greater than 0",
            ));
        }

        if generation.max_list_amount == 0 {
            errors.push(ValidationError::invalid(
                "generation.max_list_amount",
                "Must be greater than 0",
            ));
        }

        if generation.max_len == 0 {
            errors.push(ValidationError::invalid(
                "generation.max_len",
                "Must be greater than 0",
            ));
        }

        if generation.max_repeated_objects < generation.max_repeat {
            errors.push(ValidationError::invalid(
                "generation.max_repeated_objects",
                format!("Must be at least max_repeat ({})", generation.max_repeat),
            ));
        }
    }

    fn validate_rate_limit(rate_limit: &RateLimitConfig, errors: &mut Vec<ValidationError>) {
        if !rate_limit.enabled {
            return;
        }

        if rate_limit.requests_per_second == 0 {
            errors.push(ValidationError::invalid(
                "rate_limit.requests_per_second",
                "Must be greater than 0",
            ));
        }

        if rate_limit.burst_size == 0 {
            errors.push(ValidationError::invalid(
                "rate_limit.burst_size",
                "Must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings() {
        assert!(ConfigValidator::validate(&Settings::default()).is_ok());
    }

    #[test]
    fn test_invalid_server() {
        let mut settings = Settings::default();
        settings.server.host = String::new();
        settings.server.port = 0;

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ValidationError::MissingField(_)));
    }

    #[test]
    fn test_invalid_generation_limits() {
        let mut settings = Settings::default();
        settings.generation.max_amount = 5;
        settings.generation.default_amount = 10;
        settings.generation.max_repeat = 0;

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(errors.len(), 2);
        assert!(messages[0].contains("generation.default_amount"));
        assert!(messages[1].contains("generation.max_repeat"));
    }

    #[test]
    fn test_invalid_size_and_repetition_budget() {
        let mut settings = Settings::default();
        settings.generation.max_len = 0;
        settings.generation.max_repeated_objects = 10;

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(errors.len(), 2);
        assert!(messages[0].contains("generation.max_len"));
        assert!(messages[1].contains("generation.max_repeated_objects"));
    }

    #[test]
    fn test_rate_limit_checked_only_when_enabled() {
        let mut settings = Settings::default();
        settings.rate_limit = Some(RateLimitConfig {
            enabled: false,
            requests_per_second: 0,
            burst_size: 0,
        });
        assert!(ConfigValidator::validate(&settings).is_ok());

        settings.rate_limit = Some(RateLimitConfig {
            enabled: true,
            requests_per_second: 0,
            burst_size: 10,
        });
        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
    }
}
