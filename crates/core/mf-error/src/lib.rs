//! Error types for metafill.
//!
//! This crate provides:
//! - [`MfError`] - Top-level error enum for the enrichment stage
//! - Domain-specific errors ([`ConfigError`], [`ReadingError`])
//! - [`Result`] alias used across the workspace

use thiserror::Error;

/// Top-level error type for metafill.
#[derive(Error, Debug)]
pub enum MfError {
    /// Configuration errors (parsing, shape, unsupported members)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading container errors (decoding readings supplied by a host)
    #[error("Reading error: {0}")]
    Reading(#[from] ReadingError),
}

/// Errors raised while turning a configuration into metadata fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration text is not valid JSON
    #[error("Unable to parse metadata config: {0}")]
    Parse(String),

    /// The configuration parsed, but the root is not a JSON object
    #[error("Metadata config must be a JSON object, got {0}")]
    NotAnObject(String),

    /// A member whose value is neither string, number nor object
    #[error("Unable to parse value for metadata field '{name}' ({kind}), skipping")]
    UnsupportedFieldType { name: String, kind: String },

    /// A host-level option carries a value of the wrong shape
    #[error("Invalid value for option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },
}

/// Errors raised while decoding readings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadingError {
    /// A datapoint value that is not a string, integer or double
    #[error("Unsupported value for datapoint '{name}' ({kind})")]
    UnsupportedValue { name: String, kind: String },
}

impl MfError {
    /// Returns true if this error came from configuration handling.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias using MfError.
pub type Result<T> = std::result::Result<T, MfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = MfError::Config(ConfigError::Parse("expected value at line 1".to_string()));
        assert!(error.to_string().contains("Unable to parse metadata config"));
        assert!(error.is_config());
    }

    #[test]
    fn test_unsupported_field_names_field() {
        let error = ConfigError::UnsupportedFieldType {
            name: "tags".to_string(),
            kind: "array".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'tags'"));
        assert!(message.contains("array"));
    }

    #[test]
    fn test_reading_error_is_not_config() {
        let error: MfError = ReadingError::UnsupportedValue {
            name: "flags".to_string(),
            kind: "array".to_string(),
        }
        .into();
        assert!(!error.is_config());
        assert!(error.to_string().contains("'flags'"));
    }
}
