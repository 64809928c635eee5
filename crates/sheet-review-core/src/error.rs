//! Error types for sheet-review-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or inspecting a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not resolve to an existing file
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The loader could not interpret the file as a spreadsheet
    #[error("{0}")]
    Parse(String),

    /// File extension is not one the loader understands
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Malformed in-memory input reached the data model
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),
}

impl Error {
    /// Create a new "invalid input" error with a message
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a new parse error with a message
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_message() {
        let err = Error::FileNotFound(PathBuf::from("missing.xlsx"));
        assert_eq!(err.to_string(), "File not found: missing.xlsx");
    }

    #[test]
    fn test_parse_message_is_verbatim() {
        let err = Error::parse("ZIP error: invalid Zip archive");
        assert_eq!(err.to_string(), "ZIP error: invalid Zip archive");
    }
}
