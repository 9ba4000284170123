//! Error types for tokmerge
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur while merging tokens
#[derive(Debug, Error)]
pub enum TokenError {
    /// Input is not valid JSON or does not have the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// An expected input file is absent
    #[error("Missing file: {}", .0.display())]
    MissingFile(PathBuf),

    /// The output path could not be overwritten
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Namespace path is empty or contains an empty segment
    #[error("Invalid namespace: {0}")]
    InvalidNamespace(String),

    /// A namespace ancestor holds a token instead of a group
    #[error("Namespace conflict: {0}")]
    NamespaceConflict(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tokmerge operations
pub type Result<T> = std::result::Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_error() {
        let err = TokenError::MalformedInput("root is not an object".to_string());
        assert_eq!(err.to_string(), "Malformed input: root is not an object");
    }

    #[test]
    fn test_missing_file_error() {
        let err = TokenError::MissingFile(PathBuf::from("tokens/tokens.json"));
        assert_eq!(err.to_string(), "Missing file: tokens/tokens.json");
    }

    #[test]
    fn test_write_failure_error() {
        let err = TokenError::WriteFailure {
            path: PathBuf::from("/readonly/tokens.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(err.to_string().starts_with("Failed to write /readonly/tokens.json"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_namespace_conflict_error() {
        let err = TokenError::NamespaceConflict("base/colors is a token".to_string());
        assert_eq!(err.to_string(), "Namespace conflict: base/colors is a token");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TokenError = io_err.into();
        assert!(matches!(err, TokenError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: TokenError = json_err.into();
        assert!(matches!(err, TokenError::Json(_)));
    }
}
