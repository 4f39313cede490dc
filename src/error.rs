//! Error types and handling for the weather advisory engine

use thiserror::Error;

/// Main error type for the advisory engine
#[derive(Error, Debug)]
pub enum AdvisoryError {
    /// A field the analysis cannot proceed without is absent
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Record (de)serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl AdvisoryError {
    /// Create a new missing field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AdvisoryError::MissingField { field } => {
                format!("The forecast is incomplete: '{field}' is required.")
            }
            AdvisoryError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AdvisoryError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            AdvisoryError::Io { .. } => {
                "File operation failed. Please check file paths and permissions.".to_string()
            }
            AdvisoryError::Json { .. } => {
                "Weather records could not be parsed. Please check the input files.".to_string()
            }
        }
    }
}
