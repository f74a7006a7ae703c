//! Error types for tfplug-function

/// Error type for value construction and conversion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TfplugError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("unhandled null value: cannot store null in {0}")]
    UnhandledNull(String),

    #[error("unhandled unknown value: cannot store unknown in {0}")]
    UnhandledUnknown(String),

    #[error("Missing object attribute value: {0}")]
    MissingAttribute(String),

    #[error("can't store {value} in {target}")]
    OutOfRange { value: String, target: String },

    #[error("{0}")]
    Custom(String),
}

/// Result type alias for tfplug-function operations
pub type Result<T> = std::result::Result<T, TfplugError>;

impl From<String> for TfplugError {
    fn from(s: String) -> Self {
        TfplugError::Custom(s)
    }
}

impl From<&str> for TfplugError {
    fn from(s: &str) -> Self {
        TfplugError::Custom(s.to_string())
    }
}
