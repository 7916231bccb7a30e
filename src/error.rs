//! Error types for document conversion.
//!
//! Markdown itself never produces an error: malformed constructs degrade to
//! plain text. Errors only arise while serializing the OOXML package or when
//! the caller-supplied input breaks the size ceiling.
use thiserror::Error;

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected before parsing
    #[error("markdown is {len} characters, limit is {max}")]
    InputTooLarge { len: usize, max: usize },

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Xml(err.to_string())
    }
}
