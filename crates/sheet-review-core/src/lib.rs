//! # sheet-review-core
//!
//! Core data structures for the sheet-review workbook inspector.
//!
//! This crate provides the types shared by the loaders and the inspector:
//! - [`CellValue`] - A loaded cell value (number, string, boolean, datetime)
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`Column`] and [`ValueKind`] - Column metadata with its inferred type
//! - [`Table`], [`Workbook`] - The loaded document structures
//!
//! ## Example
//!
//! ```rust
//! use sheet_review_core::{CellValue, Table, ValueKind, Workbook};
//!
//! let table = Table::from_grid(
//!     "Accounts",
//!     vec![
//!         vec![CellValue::from("Name"), CellValue::from("Seats")],
//!         vec![CellValue::from("Acme"), CellValue::from(12)],
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(table.column_count(), 2);
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(table.columns()[1].kind(), ValueKind::Integer);
//!
//! let mut workbook = Workbook::new();
//! workbook.push_table(table);
//! assert_eq!(workbook.table_count(), 1);
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod table;
pub mod workbook;

// Re-exports for convenience
pub use cell::{CellAddress, CellValue, SharedString};
pub use column::{Column, ValueKind};
pub use error::{Error, Result};
pub use table::Table;
pub use workbook::Workbook;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
