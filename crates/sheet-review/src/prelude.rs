//! Prelude module - common imports for sheet-review users
//!
//! ```rust
//! use sheet_review::prelude::*;
//! ```

pub use crate::{
    // Cell and table types
    CellValue,
    Column,
    // Inspection types
    ComparisonResult,
    CsvReadOptions,
    // I/O types
    CsvReader,
    // Error types
    Error,
    ExpectedSchema,
    Report,
    Result,
    ReviewOptions,
    SchemaInspector,
    Table,
    ValueKind,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    WorkbookInspectExt,
    XlsxReader,
};
