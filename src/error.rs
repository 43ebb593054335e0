//! Error types for restyle library.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Result type alias for restyle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while authoring rules or styling documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A style rule is malformed (bad percent, color triple, target or action).
    #[error("Invalid rule: {0}")]
    Validation(String),

    /// Grammatical classification failed or was refused.
    #[error("Classification error: {0}")]
    Classification(String),

    /// The file extension is not handled by any registered format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The document content could not be parsed.
    #[error("Corrupted document: {0}")]
    Corrupted(String),

    /// The document could not be serialized.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Coarse category of this error, as reported in batch outcomes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Classification(_) => ErrorKind::Classification,
            Error::Io(_) | Error::Corrupted(_) => ErrorKind::Io,
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::Render(_) | Error::Other(_) => ErrorKind::Other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Corrupted(err.to_string())
        }
    }
}

/// Error category carried by a failed document outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed rule
    Validation,
    /// Tagging failed
    Classification,
    /// Document unreadable or unwritable
    Io,
    /// File extension not recognized
    UnsupportedFormat,
    /// Anything else
    Other,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Classification => "classification",
            ErrorKind::Io => "io",
            ErrorKind::UnsupportedFormat => "unsupported format",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Validation("percent 120 is out of range".into());
        assert_eq!(err.to_string(), "Invalid rule: percent 120 is out of range");

        let err = Error::UnsupportedFormat("pdf".into());
        assert_eq!(err.to_string(), "Unsupported format: pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_json_error_is_corrupted() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Corrupted(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::Classification("x".into()).kind(),
            ErrorKind::Classification
        );
        assert_eq!(
            Error::UnsupportedFormat("x".into()).kind(),
            ErrorKind::UnsupportedFormat
        );
        assert_eq!(Error::Other("x".into()).kind(), ErrorKind::Other);
    }
}
