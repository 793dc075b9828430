//! Error types and handling for the `iptracker` service

use thiserror::Error;

/// Main error type for the `iptracker` service
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Geo resolver / IP-echo communication errors
    #[error("Lookup error: {message}")]
    Lookup { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TrackerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new lookup error
    pub fn lookup<S: Into<String>>(message: S) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            TrackerError::Lookup { .. } => {
                "Sorry, we're unable to find anything for this search. Please try another IP or domain."
                    .to_string()
            }
            TrackerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TrackerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TrackerError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TrackerError::config("missing API key");
        assert!(matches!(config_err, TrackerError::Config { .. }));

        let lookup_err = TrackerError::lookup("connection failed");
        assert!(matches!(lookup_err, TrackerError::Lookup { .. }));

        let validation_err = TrackerError::validation("not an IP or domain");
        assert!(matches!(validation_err, TrackerError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TrackerError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let lookup_err = TrackerError::lookup("test");
        assert!(lookup_err.user_message().contains("unable to find anything"));

        let validation_err = TrackerError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tracker_err: TrackerError = io_err.into();
        assert!(matches!(tracker_err, TrackerError::Io { .. }));
    }
}
