//! # sheet-review-csv
//!
//! CSV loader for sheet-review. A CSV file loads as a workbook with a single
//! table named after the file.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
