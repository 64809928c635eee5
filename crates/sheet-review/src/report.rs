//! Text report rendering

use std::fmt;
use std::io;

use sheet_review_core::CellValue;

use crate::inspect::{ColumnDescription, ComparisonResult, TableDescription, WorkbookSummary};

const WIDTH: usize = 80;

/// Result of a full review, ready to render
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    /// Where the workbook was loaded from, shown in the heading
    pub source: Option<String>,
    /// Requested sample size, shown in each sample heading
    pub sample_size: usize,
    pub sheets: Vec<SheetReport>,
    pub summary: WorkbookSummary,
    pub comparisons: Vec<ComparisonResult>,
}

/// Description and sampled rows of one sheet
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SheetReport {
    pub description: TableDescription,
    pub sample: Vec<Vec<CellValue>>,
}

impl Report {
    /// Attach the workbook's location
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Write the rendered report to `out`
    pub fn render<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(WIDTH);
        let light = "-".repeat(WIDTH);

        writeln!(f, "{heavy}")?;
        writeln!(f, "MULAOS DATABASE STRUCTURE REVIEW")?;
        writeln!(f, "{heavy}")?;
        writeln!(f)?;
        if let Some(source) = &self.source {
            writeln!(f, "📊 Spreadsheet: {source}")?;
        }
        writeln!(f, "📑 Sheets found: {}", self.sheets.len())?;

        for sheet in &self.sheets {
            let description = &sheet.description;
            writeln!(f)?;
            writeln!(f, "{light}")?;
            writeln!(f, "📋 SHEET: {}", description.name)?;
            writeln!(f, "{light}")?;
            writeln!(f, "   Columns: {}", description.column_count())?;
            writeln!(f, "   Rows (including header): {}", description.row_count + 1)?;
            writeln!(f)?;
            writeln!(f, "   Column Structure:")?;
            for column in &description.columns {
                writeln!(
                    f,
                    "   {:2}. {:30} | Type: {:15} | Non-null: {:4}",
                    column.position,
                    column.name,
                    column.kind.as_str(),
                    column.non_null
                )?;
            }

            writeln!(f)?;
            if sheet.sample.is_empty() {
                writeln!(f, "   ⚠️  No data rows (only headers)")?;
            } else {
                writeln!(f, "   Sample Data (first {} rows):", self.sample_size)?;
                f.write_str(&sample_table(&description.columns, &sheet.sample))?;
            }
        }

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "{heavy}")?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{heavy}")?;
        write_summary(f, &self.summary)?;

        writeln!(f)?;
        writeln!(f, "EXPECTED STRUCTURE CHECK:")?;
        writeln!(f, "{light}")?;
        for comparison in &self.comparisons {
            write_comparison(f, comparison)?;
        }

        Ok(())
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, summary: &WorkbookSummary) -> fmt::Result {
    writeln!(f, "Total Sheets: {}", summary.table_count)?;
    for table in &summary.tables {
        writeln!(f, "  {}: {} columns", table.name, table.column_count)?;
    }
    writeln!(f, "Total Columns: {}", summary.total_columns)
}

fn write_comparison(f: &mut fmt::Formatter<'_>, comparison: &ComparisonResult) -> fmt::Result {
    match comparison {
        ComparisonResult::Match { name, columns } => writeln!(
            f,
            "✅ {:20} | Expected: {:2} | Actual: {:2}",
            name, columns, columns
        ),
        ComparisonResult::Mismatch {
            name,
            expected,
            actual,
        } => writeln!(
            f,
            "⚠️ {:20} | Expected: {:2} | Actual: {:2}",
            name, expected, actual
        ),
        ComparisonResult::Missing { name, expected } => {
            writeln!(f, "❌ {:20} | Expected: {:2} | MISSING", name, expected)
        }
    }
}

/// Lay out sampled rows as a right-aligned grid, headers on the first line
fn sample_table(columns: &[ColumnDescription], rows: &[Vec<CellValue>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|s| s.chars().count())
                .chain(std::iter::once(column.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = padded_line(columns.iter().map(|c| c.name.as_str()), &widths);
    out.push('\n');
    for row in &cells {
        out.push_str(&padded_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }

    out
}

fn padded_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    values
        .zip(widths)
        .map(|(value, width)| format!("{:>width$}", value, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::{SchemaInspector, WorkbookInspectExt};
    use crate::schema::ExpectedSchema;
    use crate::ReviewOptions;
    use pretty_assertions::assert_eq;
    use sheet_review_core::{Table, Workbook};

    fn accounts() -> Table {
        Table::from_grid(
            "Accounts",
            vec![
                vec![CellValue::from("Name"), CellValue::from("Seats")],
                vec![CellValue::from("Acme"), CellValue::from(12)],
                vec![CellValue::from("Globex Corporation"), CellValue::from(3)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_sample_table_layout() {
        let table = accounts();
        let description = SchemaInspector::describe_table(&table);

        let rendered = sample_table(&description.columns, table.rows());

        assert_eq!(
            rendered,
            concat!(
                "              Name  Seats\n",
                "              Acme     12\n",
                "Globex Corporation      3\n",
            )
        );
    }

    #[test]
    fn test_render_sections() {
        let workbook = Workbook::from_tables(vec![
            accounts(),
            Table::new("Tasks", vec!["Title".to_string()], vec![]).unwrap(),
        ]);
        let expected = ExpectedSchema::new()
            .with_sheet("Accounts", 2)
            .with_sheet("Tasks", 15)
            .with_sheet("Lookups", 4);

        let report = workbook
            .inspect(&expected, &ReviewOptions::default())
            .with_source("MulaOS_Database.xlsx");
        let text = report.to_string();

        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("MULAOS DATABASE STRUCTURE REVIEW\n"));
        assert!(text.contains("📊 Spreadsheet: MulaOS_Database.xlsx\n"));
        assert!(text.contains("📑 Sheets found: 2\n"));
        assert!(text.contains("📋 SHEET: Accounts\n"));
        assert!(text.contains("   Rows (including header): 3\n"));
        assert!(text.contains(
            "    2. Seats                          | Type: integer         | Non-null:    2\n"
        ));
        assert!(text.contains("   Sample Data (first 3 rows):\n"));
        assert!(text.contains("   ⚠️  No data rows (only headers)\n"));
        assert!(text.contains("Total Sheets: 2\n  Accounts: 2 columns\n  Tasks: 1 columns\nTotal Columns: 3\n"));
        assert!(text.contains("✅ Accounts             | Expected:  2 | Actual:  2\n"));
        assert!(text.contains("⚠️ Tasks                | Expected: 15 | Actual:  1\n"));
        assert!(text.contains("❌ Lookups              | Expected:  4 | MISSING\n"));
    }

    #[test]
    fn test_render_matches_display() {
        let workbook = Workbook::from_tables(vec![accounts()]);
        let report = workbook.inspect(&ExpectedSchema::new(), &ReviewOptions::default());

        let mut buf = Vec::new();
        report.render(&mut buf).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), report.to_string());
        assert!(!report.to_string().contains("📊"));
    }

    #[test]
    fn test_empty_workbook_report() {
        let report = Workbook::new().inspect(&ExpectedSchema::mula_os(), &ReviewOptions::default());
        let text = report.to_string();

        assert!(text.contains("📑 Sheets found: 0\n"));
        assert!(text.contains("Total Sheets: 0\nTotal Columns: 0\n"));
        assert_eq!(text.matches("| MISSING").count(), 7);
    }
}
