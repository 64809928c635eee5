//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use sheet_review_core::{CellValue, Table, Workbook};

/// Sheet name used when the source has no file name
const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a single-table workbook named after the file stem
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Workbook> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SHEET_NAME);

        let file = File::open(path)?;
        Self::read_named(file, name, options)
    }

    /// Read CSV from a reader into a single-table workbook named "Sheet1"
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Workbook> {
        Self::read_named(reader, DEFAULT_SHEET_NAME, options)
    }

    /// Read CSV from a reader into a single-table workbook with the given sheet name
    pub fn read_named<R: Read>(
        reader: R,
        name: &str,
        options: &CsvReadOptions,
    ) -> CsvResult<Workbook> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut grid: Vec<Vec<CellValue>> = Vec::new();
        // The header is the first non-blank record, not necessarily the first
        let mut header_seen = false;

        for result in csv_reader.records() {
            let record = result?;

            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if !header_seen || !options.auto_detect_types {
                        text_value(field)
                    } else {
                        Self::detect_type(field)
                    }
                })
                .collect();

            header_seen |= row.iter().any(|v| !v.is_empty());
            grid.push(row);
        }

        log::debug!("read {} CSV records for '{}'", grid.len(), name);

        let table = Table::from_grid(name, grid)?;
        Ok(Workbook::from_tables(vec![table]))
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let field = field.trim();

        if field.is_empty() {
            return CellValue::Empty;
        }

        if field.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if field.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // Try number, but leave "inf"/"NaN" spellings as text
        if let Ok(n) = field.parse::<f64>() {
            if n.is_finite() {
                return CellValue::Number(n);
            }
        }

        if let Some(dt) = parse_datetime(field) {
            return CellValue::DateTime(dt);
        }

        // Default to string
        CellValue::string(field)
    }
}

fn text_value(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::string(field)
    }
}

fn parse_datetime(field: &str) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(field, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(field, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
