//! Error types shared across touchtrace crates.

use std::path::PathBuf;

/// Top-level error type for touchtrace operations.
#[derive(Debug, thiserror::Error)]
pub enum TouchtraceError {
    #[error("Detection error: {message}")]
    Detection { message: String },

    #[error("Classification error: {message}")]
    Classification { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown classifier profile: {name}")]
    UnknownProfile { name: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias using TouchtraceError.
pub type TouchtraceResult<T> = Result<T, TouchtraceError>;

impl TouchtraceError {
    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection {
            message: msg.into(),
        }
    }

    pub fn classification(msg: impl Into<String>) -> Self {
        Self::Classification {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TouchtraceError::config("tap_epsilon must be positive").to_string(),
            "Configuration error: tap_epsilon must be positive"
        );
        assert_eq!(
            TouchtraceError::UnknownProfile {
                name: "pixel-3".into()
            }
            .to_string(),
            "Unknown classifier profile: pixel-3"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> TouchtraceResult<String> {
            Ok(std::fs::read_to_string("/definitely/not/a/real/path.json")?)
        }
        assert!(matches!(read(), Err(TouchtraceError::Io(_))));
    }
}
