//! Centralized error types for the tag input widget.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// The main application error type.
///
/// This enum aggregates all error types that can occur in the widget and
/// its host application, providing user-friendly error messages while
/// preserving the underlying error context for debugging.
#[derive(Debug, Error)]
pub enum AppError {
    /// A value failed validation (e.g. a malformed absolute link).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An unknown public operation name or an invalid configuration value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An import or search payload did not have the expected shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Configuration file errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Search API errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, etc.).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    /// Create a malformed-input error.
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        AppError::MalformedInput(msg.into())
    }

    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// This returns a message suitable for showing to users in the UI,
    /// without technical jargon or stack traces.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Invalid value: {}", msg),
            AppError::Configuration(msg) => format!("Configuration problem: {}", msg),
            AppError::MalformedInput(msg) => format!("Could not read the data: {}", msg),
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file exists and is readable.".to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(e) => match e {
                ApiError::NotFound(resource) => format!("'{}' was not found.", resource),
                ApiError::RateLimited => {
                    "Too many requests. Please wait a moment and try again.".to_string()
                }
                ApiError::ServerError(_) => {
                    "Search server error. Please try again later.".to_string()
                }
                ApiError::Network(_) => {
                    "Connection failed. Please check your internet connection.".to_string()
                }
                ApiError::InvalidUrl(_) => "Invalid search URL in configuration.".to_string(),
                ApiError::InvalidResponse(_) => {
                    "Unexpected response from the search endpoint. Please try again.".to_string()
                }
            },
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if this error is critical and requires user acknowledgment.
    ///
    /// Critical errors indicate issues that prevent the widget from
    /// functioning, such as configuration problems. Search failures are not
    /// critical: the widget simply stays in its pre-search state.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            AppError::Config(_) | AppError::Configuration(_) | AppError::Terminal(_)
        )
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let config_err = ConfigError::NoConfigDir;
        let app_err: AppError = config_err.into();
        assert!(matches!(
            app_err,
            AppError::Config(ConfigError::NoConfigDir)
        ));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let api_err = ApiError::RateLimited;
        let app_err: AppError = api_err.into();
        assert!(matches!(app_err, AppError::Api(ApiError::RateLimited)));
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::validation("not an absolute url");
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.user_message().contains("not an absolute url"));
        assert!(!err.is_critical());
    }

    #[test]
    fn test_configuration_error_is_critical() {
        let err = AppError::configuration("unknown operation 'destory'");
        assert!(err.is_critical());
        assert!(err.user_message().contains("destory"));
    }

    #[test]
    fn test_malformed_input_error() {
        let err = AppError::malformed_input("expected an array of seeds");
        assert!(matches!(err, AppError::MalformedInput(_)));
        assert!(!err.is_critical());
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError(
            "content width exceeds wrapper width".to_string(),
        ));
        let msg = err.user_message();
        assert!(msg.contains("content width exceeds wrapper width"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }
}
