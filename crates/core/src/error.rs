//! Error handling for the Groupie core library

use std::fmt;
use thiserror::Error;

/// Result type alias for Groupie operations
pub type Result<T> = std::result::Result<T, GroupieError>;

/// Main error type for Groupie operations
#[derive(Error, Debug)]
pub enum GroupieError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Upstream API answered with something unusable
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Network connectivity errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Artist id missing, non-numeric or out of range
    #[error("Invalid artist id: '{value}'")]
    InvalidArtistId { value: String },

    /// Resource not found errors
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },
}

impl GroupieError {
    /// Create an upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid artist id error
    pub fn invalid_artist_id<S: Into<String>>(value: S) -> Self {
        Self::InvalidArtistId {
            value: value.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Http(_) | Self::Network { .. } => ErrorCategory::Network,
            Self::Upstream { .. } => ErrorCategory::Upstream,
            Self::Json(_) | Self::Yaml(_) => ErrorCategory::Serialization,
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::Template(_) => ErrorCategory::Template,
            Self::Url(_) => ErrorCategory::Url,
            Self::Validation { .. } | Self::InvalidArtistId { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
        }
    }
}

/// Error categories for logging
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    FileSystem,
    Network,
    Upstream,
    Serialization,
    Configuration,
    Template,
    Url,
    Validation,
    NotFound,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileSystem => write!(f, "filesystem"),
            Self::Network => write!(f, "network"),
            Self::Upstream => write!(f, "upstream"),
            Self::Serialization => write!(f, "serialization"),
            Self::Configuration => write!(f, "configuration"),
            Self::Template => write!(f, "template"),
            Self::Url => write!(f, "url"),
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = GroupieError::upstream("bad gateway");
        assert!(matches!(err, GroupieError::Upstream { .. }));
        assert_eq!(err.to_string(), "Upstream error: bad gateway");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            GroupieError::network("down").category(),
            ErrorCategory::Network
        );
        assert_eq!(
            GroupieError::invalid_artist_id("abc").category(),
            ErrorCategory::Validation
        );
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
    }

    #[test]
    fn test_error_from_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GroupieError = io_err.into();
        assert!(matches!(err, GroupieError::Io(_)));

        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: GroupieError = json_err.into();
        assert!(matches!(err, GroupieError::Json(_)));
    }

    #[test]
    fn test_error_display() {
        let err = GroupieError::invalid_artist_id("53");
        assert_eq!(err.to_string(), "Invalid artist id: '53'");

        let err = GroupieError::not_found("artist 12");
        assert_eq!(err.to_string(), "Resource not found: artist 12");
    }
}
