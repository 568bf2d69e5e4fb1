//! Error types for the relume library.
//!
//! This module provides structured error handling for all relume operations.
//! Rename passes themselves never fail (see the error taxonomy in the crate
//! docs); these types cover the surrounding machinery: configuration, file
//! I/O, serialization, and the external naming service.

use std::io;

use thiserror::Error;

/// Main result type for relume operations.
pub type Result<T> = std::result::Result<T, RelumeError>;

/// Comprehensive error type for all relume operations.
#[derive(Error, Debug)]
pub enum RelumeError {
    /// I/O related errors (file operations, etc.)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Naming service (oracle) errors. These are confined to the batch they
    /// occur in and never abort a rename pass; they surface here only when
    /// the caller asks the oracle layer directly.
    #[error("Naming service error: {message}")]
    Oracle {
        /// Error description
        message: String,
        /// Batch index the failure occurred in, when applicable
        batch: Option<usize>,
        /// Underlying transport or parse error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
        /// Additional context
        context: Option<String>,
    },
}

impl RelumeError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new naming service error
    pub fn oracle(message: impl Into<String>) -> Self {
        Self::Oracle {
            message: message.into(),
            batch: None,
            source: None,
        }
    }

    /// Create a new naming service error scoped to one batch
    pub fn oracle_batch(message: impl Into<String>, batch: usize) -> Self {
        Self::Oracle {
            message: message.into(),
            batch: Some(batch),
            source: None,
        }
    }

    /// Create a new naming service error wrapping a transport failure
    pub fn oracle_transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Oracle {
            message: message.into(),
            batch: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Internal { context: ctx, .. } => {
                *ctx = Some(context.into());
            }
            _ => {} // Other variants carry their own context fields
        }
        self
    }
}

// Implement From traits for common error types
impl From<io::Error> for RelumeError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for RelumeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for RelumeError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for RelumeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Oracle {
            message: format!("Request to naming service failed: {err}"),
            batch: None,
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RelumeError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RelumeError::config("Invalid configuration");
        assert!(matches!(err, RelumeError::Config { .. }));

        let err = RelumeError::oracle("Service returned garbage");
        assert!(matches!(err, RelumeError::Oracle { .. }));
    }

    #[test]
    fn test_error_with_context() {
        let err = RelumeError::internal("Something went wrong").with_context("During rewrite");

        if let RelumeError::Internal { context, .. } = err {
            assert_eq!(context, Some("During rewrite".to_string()));
        } else {
            panic!("Expected Internal error");
        }
    }

    #[test]
    fn test_io_error_creation() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Access denied");
        let err = RelumeError::io("Failed to write output", io_err);

        if let RelumeError::Io { message, source } = &err {
            assert_eq!(message, "Failed to write output");
            assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
        } else {
            panic!("Expected Io error");
        }
    }

    #[test]
    fn test_config_field_error() {
        let err = RelumeError::config_field("Invalid value", "prefixes");

        if let RelumeError::Config { message, field } = err {
            assert_eq!(message, "Invalid value");
            assert_eq!(field, Some("prefixes".to_string()));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_oracle_batch_error() {
        let err = RelumeError::oracle_batch("Response did not align with batch", 3);

        if let RelumeError::Oracle { message, batch, .. } = err {
            assert_eq!(message, "Response did not align with batch");
            assert_eq!(batch, Some(3));
        } else {
            panic!("Expected Oracle error");
        }
    }

    #[test]
    fn test_validation_field_error() {
        let err = RelumeError::validation_field("must not be empty", "fallback_base");

        if let RelumeError::Validation { message, field } = err {
            assert_eq!(message, "must not be empty");
            assert_eq!(field, Some("fallback_base".to_string()));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_result_extension() {
        let result: std::result::Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));

        let relume_result = result.context("Failed to read input file");
        assert!(relume_result.is_err());
        assert!(matches!(
            relume_result.unwrap_err(),
            RelumeError::Io { .. }
        ));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let relume_err: RelumeError = json_err.into();

        if let RelumeError::Serialization { data_type, .. } = relume_err {
            assert_eq!(data_type, Some("JSON".to_string()));
        } else {
            panic!("Expected Serialization error");
        }
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<i32>("invalid: yaml: content").unwrap_err();
        let relume_err: RelumeError = yaml_err.into();

        if let RelumeError::Serialization { data_type, .. } = relume_err {
            assert_eq!(data_type, Some("YAML".to_string()));
        } else {
            panic!("Expected Serialization error");
        }
    }

    #[test]
    fn test_error_display_formatting() {
        let err = RelumeError::oracle_batch("timed out", 2);
        let display = format!("{}", err);
        assert!(display.contains("Naming service error"));
        assert!(display.contains("timed out"));
    }

    #[test]
    fn test_error_debug_formatting() {
        let err = RelumeError::config_field("unknown prefix shape", "prefixes");
        let debug = format!("{:?}", err);
        assert!(debug.contains("Config"));
        assert!(debug.contains("unknown prefix shape"));
        assert!(debug.contains("prefixes"));
    }
}
