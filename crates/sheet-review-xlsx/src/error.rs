//! XLSX loader errors

use thiserror::Error;

/// Result type for XLSX loading
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors raised while loading an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    /// The file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable zip archive
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A package part is not well-formed XML
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The archive is not an XLSX package (no `[Content_Types].xml`)
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// A part the workbook needs is absent: `xl/workbook.xml`, its rels, or a worksheet
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// A cell's `r` attribute is not a valid A1 reference
    #[error("Parse error: {0}")]
    Parse(String),

    /// A sheet could not be turned into a table
    #[error("Core error: {0}")]
    Core(#[from] sheet_review_core::Error),
}
