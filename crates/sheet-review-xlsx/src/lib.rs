//! # sheet-review-xlsx
//!
//! XLSX (Office Open XML) loader for sheet-review.
//!
//! Only what the inspector needs is read: sheet order and names, cell values
//! (formulas as their cached result), and the number formats that mark a
//! numeric cell as a date.

pub mod error;
pub mod reader;

mod dates;
mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
