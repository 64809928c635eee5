//! # sheet-review
//!
//! Inspect the structure of spreadsheet workbooks.
//!
//! sheet-review loads an XLSX or CSV file, describes every sheet's columns
//! (inferred type and non-null count), samples the first data rows, and
//! checks the workbook against an expected layout of sheet names and column
//! counts.
//!
//! ## Features
//!
//! - Read XLSX files (Office Open XML), including date-formatted cells
//! - Read CSV files with value type detection
//! - Per-column type inference and non-null counts
//! - Comparison against an [`ExpectedSchema`]
//! - Plain-text report rendering
//!
//! ## Example
//!
//! ```rust,no_run
//! use sheet_review::prelude::*;
//!
//! let workbook = Workbook::open("MulaOS_Database.xlsx")?;
//! let report = workbook
//!     .inspect(&ExpectedSchema::mula_os(), &ReviewOptions::default())
//!     .with_source("MulaOS_Database.xlsx");
//!
//! print!("{report}");
//! # Ok::<(), sheet_review::Error>(())
//! ```

pub mod inspect;
pub mod prelude;
pub mod report;
pub mod schema;

pub use inspect::{
    ColumnDescription, ComparisonResult, ReviewOptions, SchemaInspector, TableDescription,
    TableSummary, WorkbookInspectExt, WorkbookSummary,
};
pub use report::{Report, SheetReport};
pub use schema::ExpectedSchema;

// Re-export core types
pub use sheet_review_core::{
    CellAddress, CellValue, Column, Error, Result, SharedString, Table, ValueKind, Workbook,
    MAX_COLS, MAX_ROWS,
};

// Re-export I/O types
pub use sheet_review_csv::{CsvError, CsvReadOptions, CsvReader};
pub use sheet_review_xlsx::{XlsxError, XlsxReader};

use std::io::ErrorKind;
use std::path::Path;

/// Extension trait for Workbook to add file loading
pub trait WorkbookExt {
    /// Open a workbook from a file, choosing the reader by extension
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let workbook = match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => {
                XlsxReader::read_file(path).map_err(|e| xlsx_error(path, e))?
            }
            Some("csv") => CsvReader::read_file(path, &CsvReadOptions::default())
                .map_err(|e| csv_error(path, e))?,
            _ => {
                return Err(Error::UnsupportedFormat(path.display().to_string()));
            }
        };

        log::debug!(
            "opened '{}' with {} sheets",
            path.display(),
            workbook.table_count()
        );
        Ok(workbook)
    }
}

fn xlsx_error(path: &Path, err: XlsxError) -> Error {
    match err {
        XlsxError::Io(e) if e.kind() == ErrorKind::NotFound => {
            Error::FileNotFound(path.to_path_buf())
        }
        XlsxError::Core(e) => e,
        other => Error::Parse(other.to_string()),
    }
}

fn csv_error(path: &Path, err: CsvError) -> Error {
    match err {
        CsvError::Io(e) if e.kind() == ErrorKind::NotFound => {
            Error::FileNotFound(path.to_path_buf())
        }
        CsvError::Core(e) => e,
        other => Error::Parse(other.to_string()),
    }
}
