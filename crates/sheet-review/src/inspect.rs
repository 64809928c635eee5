//! Schema inspection
//!
//! Everything here reads a loaded [`Workbook`] and never mutates it, so the
//! same workbook can be inspected any number of times with identical results.
//!
//! # Example
//!
//! ```rust
//! use sheet_review::prelude::*;
//!
//! let accounts = Table::from_grid(
//!     "Accounts",
//!     vec![
//!         vec![CellValue::from("Name"), CellValue::from("Seats")],
//!         vec![CellValue::from("Acme"), CellValue::from(12)],
//!     ],
//! )
//! .unwrap();
//! let workbook = Workbook::from_tables(vec![accounts]);
//!
//! let expected = ExpectedSchema::new()
//!     .with_sheet("Accounts", 2)
//!     .with_sheet("Contacts", 12);
//! let report = workbook.inspect(&expected, &ReviewOptions::default());
//!
//! assert_eq!(report.summary.total_columns, 2);
//! assert!(report.comparisons[0].is_match());
//! assert!(matches!(report.comparisons[1], ComparisonResult::Missing { .. }));
//! ```

use sheet_review_core::{CellValue, Table, ValueKind, Workbook};

use crate::report::{Report, SheetReport};
use crate::schema::ExpectedSchema;

/// Options controlling a review run
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    /// Number of leading data rows to sample per sheet
    pub sample_size: usize,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self { sample_size: 3 }
    }
}

/// One column of a [`TableDescription`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColumnDescription {
    /// 1-based position in the header
    pub position: usize,
    pub name: String,
    pub kind: ValueKind,
    pub non_null: usize,
}

/// Shape of a single table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableDescription {
    pub name: String,
    /// Data rows, header excluded
    pub row_count: usize,
    pub columns: Vec<ColumnDescription>,
}

impl TableDescription {
    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Column count of one table within a [`WorkbookSummary`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableSummary {
    pub name: String,
    pub column_count: usize,
}

/// Workbook-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkbookSummary {
    pub table_count: usize,
    /// Per-table column counts in workbook order
    pub tables: Vec<TableSummary>,
    pub total_columns: usize,
}

/// Outcome of checking one expected sheet against the workbook
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "lowercase"))]
pub enum ComparisonResult {
    /// The sheet exists with the expected column count
    Match { name: String, columns: usize },
    /// The sheet exists but its column count differs
    Mismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// No sheet with that name exists
    Missing { name: String, expected: usize },
}

impl ComparisonResult {
    /// Name of the expected sheet
    pub fn name(&self) -> &str {
        match self {
            ComparisonResult::Match { name, .. }
            | ComparisonResult::Mismatch { name, .. }
            | ComparisonResult::Missing { name, .. } => name,
        }
    }

    /// Expected column count
    pub fn expected(&self) -> usize {
        match self {
            ComparisonResult::Match { columns, .. } => *columns,
            ComparisonResult::Mismatch { expected, .. }
            | ComparisonResult::Missing { expected, .. } => *expected,
        }
    }

    /// Actual column count, if the sheet exists
    pub fn actual(&self) -> Option<usize> {
        match self {
            ComparisonResult::Match { columns, .. } => Some(*columns),
            ComparisonResult::Mismatch { actual, .. } => Some(*actual),
            ComparisonResult::Missing { .. } => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonResult::Match { .. })
    }
}

/// Stateless schema inspection operations
pub struct SchemaInspector;

impl SchemaInspector {
    /// Describe a table's columns in header order
    pub fn describe_table(table: &Table) -> TableDescription {
        let columns = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| ColumnDescription {
                position: i + 1,
                name: column.name().to_string(),
                kind: column.kind(),
                non_null: column.non_null(),
            })
            .collect();

        TableDescription {
            name: table.name().to_string(),
            row_count: table.row_count(),
            columns,
        }
    }

    /// Count tables and columns across the workbook
    pub fn summarize(workbook: &Workbook) -> WorkbookSummary {
        let tables: Vec<TableSummary> = workbook
            .tables()
            .iter()
            .map(|table| TableSummary {
                name: table.name().to_string(),
                column_count: table.column_count(),
            })
            .collect();

        WorkbookSummary {
            table_count: tables.len(),
            total_columns: tables.iter().map(|t| t.column_count).sum(),
            tables,
        }
    }

    /// Check every expected sheet, in schema order
    ///
    /// Sheets present in the workbook but absent from the schema are not
    /// reported. When two sheets share a name the first one is compared.
    pub fn compare_to_expected(
        workbook: &Workbook,
        expected: &ExpectedSchema,
    ) -> Vec<ComparisonResult> {
        expected
            .iter()
            .map(|(name, expected)| match workbook.table_by_name(name) {
                None => ComparisonResult::Missing {
                    name: name.to_string(),
                    expected,
                },
                Some(table) if table.column_count() == expected => ComparisonResult::Match {
                    name: name.to_string(),
                    columns: expected,
                },
                Some(table) => ComparisonResult::Mismatch {
                    name: name.to_string(),
                    expected,
                    actual: table.column_count(),
                },
            })
            .collect()
    }

    /// The first `n` data rows, or all of them if there are fewer
    pub fn sample_rows(table: &Table, n: usize) -> &[Vec<CellValue>] {
        let rows = table.rows();
        &rows[..n.min(rows.len())]
    }
}

/// Extension trait for Workbook to run a full review
pub trait WorkbookInspectExt {
    /// Describe every sheet, summarize, and compare against `expected`
    fn inspect(&self, expected: &ExpectedSchema, options: &ReviewOptions) -> Report;
}

impl WorkbookInspectExt for Workbook {
    fn inspect(&self, expected: &ExpectedSchema, options: &ReviewOptions) -> Report {
        let sheets = self
            .tables()
            .iter()
            .map(|table| SheetReport {
                description: SchemaInspector::describe_table(table),
                sample: SchemaInspector::sample_rows(table, options.sample_size).to_vec(),
            })
            .collect();

        let comparisons = SchemaInspector::compare_to_expected(self, expected);
        let matched = comparisons.iter().filter(|c| c.is_match()).count();
        log::debug!(
            "inspected {} sheets, {}/{} expected sheets match",
            self.table_count(),
            matched,
            comparisons.len()
        );

        Report {
            source: None,
            sample_size: options.sample_size,
            sheets,
            summary: SchemaInspector::summarize(self),
            comparisons,
        }
    }
}
