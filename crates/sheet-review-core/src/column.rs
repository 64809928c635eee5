//! Column types

use std::fmt;

use crate::cell::CellValue;

/// Inferred value type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    /// Whole numbers only
    Integer,
    /// Numbers, at least one with a fractional part
    Float,
    /// Strings, or a mix of value types
    Text,
    /// TRUE/FALSE values only
    Boolean,
    /// Date or time values only
    DateTime,
    /// No values at all
    Unknown,
}

impl ValueKind {
    /// Label used in reports
    pub const fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Boolean => "boolean",
            ValueKind::DateTime => "datetime",
            ValueKind::Unknown => "unknown",
        }
    }

    /// Infer the kind of a column from its values.
    ///
    /// Empty cells are ignored. Most specific kind first:
    /// 1. Unknown - no non-empty values
    /// 2. Boolean - every value is a boolean
    /// 3. Integer - every value is a whole number
    /// 4. Float - every value is a number
    /// 5. DateTime - every value is a date/time
    /// 6. Text - anything else, including mixed types
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut seen = false;
        let mut all_bool = true;
        let mut all_integral = true;
        let mut all_number = true;
        let mut all_datetime = true;

        for value in values.into_iter().filter(|v| !v.is_empty()) {
            seen = true;
            all_bool &= matches!(value, CellValue::Boolean(_));
            all_integral &= value.is_integral();
            all_number &= matches!(value, CellValue::Number(_));
            all_datetime &= matches!(value, CellValue::DateTime(_));
        }

        if !seen {
            ValueKind::Unknown
        } else if all_bool {
            ValueKind::Boolean
        } else if all_integral {
            ValueKind::Integer
        } else if all_number {
            ValueKind::Float
        } else if all_datetime {
            ValueKind::DateTime
        } else {
            ValueKind::Text
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column metadata
///
/// Column names are not unique within a table; two columns may share a name
/// and are still reported separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    kind: ValueKind,
    non_null: usize,
}

impl Column {
    /// Create a column with an already-known kind and non-null count
    pub fn new<S: Into<String>>(name: S, kind: ValueKind, non_null: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            non_null,
        }
    }

    /// Column header text
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inferred value type
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Number of rows with a value in this column
    pub fn non_null(&self) -> usize {
        self.non_null
    }
}
