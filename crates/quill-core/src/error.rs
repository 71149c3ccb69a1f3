//! Error types and exit codes for quill
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (unreadable input, failed batch fetch, invalid config)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes for quill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - bad input, config or fetch (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during quill operations
#[derive(Error, Debug)]
pub enum QuillError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Data errors (exit code 3)
    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("failed to resolve batch starting at {batch_start}: {reason}")]
    Resolver { batch_start: usize, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl QuillError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        QuillError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        QuillError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Create an error for a batch resolver that failed or was cancelled
    pub fn resolver(batch_start: usize, reason: impl std::fmt::Display) -> Self {
        QuillError::Resolver {
            batch_start,
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed operation
    pub fn failed_operation(operation: &str, reason: impl std::fmt::Display) -> Self {
        QuillError::FailedOperation {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            QuillError::UnknownFormat(_)
            | QuillError::UsageError(_)
            | QuillError::InvalidValue { .. }
            | QuillError::Unsupported { .. } => ExitCode::Usage,

            QuillError::InvalidConfig { .. } | QuillError::Resolver { .. } => ExitCode::Data,

            QuillError::Io(_)
            | QuillError::Json(_)
            | QuillError::Toml(_)
            | QuillError::FailedOperation { .. }
            | QuillError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            QuillError::UnknownFormat(_) => "unknown_format",
            QuillError::UsageError(_) => "usage_error",
            QuillError::InvalidValue { .. } => "invalid_value",
            QuillError::Unsupported { .. } => "unsupported",
            QuillError::InvalidConfig { .. } => "invalid_config",
            QuillError::Resolver { .. } => "resolver",
            QuillError::Io(_) => "io_error",
            QuillError::Json(_) => "json_error",
            QuillError::Toml(_) => "toml_error",
            QuillError::FailedOperation { .. } => "failed_operation",
            QuillError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for quill operations
pub type Result<T> = std::result::Result<T, QuillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(
            QuillError::UsageError("bad".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(QuillError::resolver(500, "boom").exit_code(), ExitCode::Data);
        assert_eq!(QuillError::Other("x".into()).exit_code(), ExitCode::Failure);
        assert_eq!(i32::from(ExitCode::Data), 3);
    }

    #[test]
    fn test_resolver_error_message() {
        let err = QuillError::resolver(10, "connection reset");
        assert_eq!(
            err.to_string(),
            "failed to resolve batch starting at 10: connection reset"
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let json = QuillError::invalid_value("side", "middle").to_json();
        assert_eq!(json["error"]["code"], 2);
        assert_eq!(json["error"]["type"], "invalid_value");
        assert_eq!(json["error"]["message"], "invalid side: middle");
    }
}
