//! Error types for the cfdix library.

use std::io;
use thiserror::Error;

/// Result type alias for cfdix operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during invoice processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document bytes are not well-formed XML.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// Error producing the spreadsheet artifact.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The combined upload size exceeds the configured ceiling.
    #[error("Payload too large: {size} bytes (limit {limit})")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The caller handed the service something it cannot work with.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedDocument("unexpected end of stream".to_string());
        assert_eq!(
            err.to_string(),
            "Malformed document: unexpected end of stream"
        );

        let err = Error::PayloadTooLarge {
            size: 6_000_000,
            limit: 5_242_880,
        };
        assert_eq!(
            err.to_string(),
            "Payload too large: 6000000 bytes (limit 5242880)"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
