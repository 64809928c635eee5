//! Table type - one named sheet with a header row and data rows

use crate::cell::CellValue;
use crate::column::{Column, ValueKind};
use crate::error::{Error, Result};

/// A loaded sheet: column metadata plus the data rows (header excluded)
///
/// Every row is exactly as wide as the column list. Column kinds and
/// non-null counts are derived once when the table is built and never
/// recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table from header names and data rows.
    ///
    /// Rows shorter than the header are padded with [`CellValue::Empty`].
    /// Fails with [`Error::InvalidInput`] when the name is empty or a row is
    /// wider than the header.
    pub fn new<S: Into<String>>(
        name: S,
        headers: Vec<String>,
        mut rows: Vec<Vec<CellValue>>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_input("table name cannot be empty"));
        }

        let width = headers.len();
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                return Err(Error::invalid_input(format!(
                    "row {} of table '{}' has {} values but only {} columns",
                    i + 1,
                    name,
                    row.len(),
                    width
                )));
            }
            row.resize(width, CellValue::Empty);
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(col, header)| {
                let values = rows.iter().map(|row| &row[col]);
                let non_null = values.clone().filter(|v| !v.is_empty()).count();
                Column::new(header, ValueKind::infer(values), non_null)
            })
            .collect();

        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    /// Build a table from a raw cell grid as read from a sheet.
    ///
    /// The first non-blank row is the header; every row after it is data.
    /// Trailing blank rows are dropped, blank rows between data rows are
    /// kept. The column count is the widest row, ignoring trailing empty
    /// cells. Empty header cells are named `Unnamed: {index}`.
    pub fn from_grid<S: Into<String>>(name: S, grid: Vec<Vec<CellValue>>) -> Result<Self> {
        let is_blank = |row: &Vec<CellValue>| row.iter().all(CellValue::is_empty);

        let mut rows = grid.into_iter().skip_while(is_blank);
        let mut header = rows.next().unwrap_or_default();
        let mut data: Vec<Vec<CellValue>> = rows.collect();

        while data.last().map_or(false, is_blank) {
            data.pop();
        }

        for row in &mut data {
            trim_trailing_empty(row);
        }
        trim_trailing_empty(&mut header);

        let width = data
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
        header.resize(width, CellValue::Empty);

        let headers = header
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                CellValue::Empty => format!("Unnamed: {}", i),
                other => other.to_string(),
            })
            .collect();

        let table = Self::new(name, headers, data)?;
        log::debug!(
            "built table '{}': {} columns, {} rows",
            table.name,
            table.column_count(),
            table.row_count()
        );
        Ok(table)
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in sheet order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows (header excluded)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Data rows in sheet order, each aligned to [`Table::columns`]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Get a data row by 0-based index
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

fn trim_trailing_empty(row: &mut Vec<CellValue>) {
    while row.last().map_or(false, CellValue::is_empty) {
        row.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn names(table: &Table) -> Vec<&str> {
        table.columns().iter().map(Column::name).collect()
    }

    #[test]
    fn test_new_infers_columns() {
        let table = Table::new(
            "Contacts",
            vec!["Name".into(), "Age".into(), "Active".into()],
            vec![
                vec!["Ada".into(), 36.into(), true.into()],
                vec!["Grace".into(), CellValue::Empty, false.into()],
            ],
        )
        .unwrap();

        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);

        let age = &table.columns()[1];
        assert_eq!(age.kind(), ValueKind::Integer);
        assert_eq!(age.non_null(), 1);
        assert_eq!(table.columns()[2].kind(), ValueKind::Boolean);
    }

    #[test]
    fn test_new_pads_short_rows() {
        let table = Table::new(
            "Pad",
            vec!["A".into(), "B".into()],
            vec![vec![1.into()]],
        )
        .unwrap();

        assert_eq!(table.row(0).unwrap(), &[CellValue::from(1), CellValue::Empty]);
        assert_eq!(table.columns()[1].non_null(), 0);
    }

    #[test]
    fn test_new_rejects_empty_name() {
        let err = Table::new("", vec!["A".into()], vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_new_rejects_wide_row() {
        let err = Table::new("Wide", vec!["A".into()], vec![vec![1.into(), 2.into()]])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_duplicate_headers_are_kept() {
        let table = Table::new(
            "Tasks",
            vec!["A".into(), "A".into(), "B".into()],
            vec![],
        )
        .unwrap();

        assert_eq!(names(&table), vec!["A", "A", "B"]);
        assert!(table.columns().iter().all(|c| c.non_null() == 0));
        assert!(table.columns().iter().all(|c| c.kind() == ValueKind::Unknown));
    }

    #[test]
    fn test_from_grid_header_and_blank_rows() {
        let grid = vec![
            vec![],
            vec!["Id".into(), CellValue::Empty, "Notes".into()],
            vec![1.into(), "x".into()],
            vec![],
            vec![2.into(), CellValue::Empty, "late".into(), CellValue::Empty],
            vec![CellValue::Empty],
            vec![],
        ];

        let table = Table::from_grid("Projects", grid).unwrap();

        assert_eq!(names(&table), vec!["Id", "Unnamed: 1", "Notes"]);
        // The blank row between data rows survives, trailing ones do not.
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns()[0].non_null(), 2);
        assert_eq!(table.columns()[1].kind(), ValueKind::Text);
    }

    #[test]
    fn test_from_grid_data_wider_than_header() {
        let grid = vec![
            vec!["Only".into()],
            vec![1.into(), CellValue::Empty, 3.5.into()],
        ];

        let table = Table::from_grid("Lookups", grid).unwrap();

        assert_eq!(names(&table), vec!["Only", "Unnamed: 1", "Unnamed: 2"]);
        assert_eq!(table.columns()[2].kind(), ValueKind::Float);
    }

    #[test]
    fn test_from_grid_numeric_header_text() {
        let grid = vec![vec![2024.into(), true.into()]];
        let table = Table::from_grid("Years", grid).unwrap();
        assert_eq!(names(&table), vec!["2024", "TRUE"]);
    }

    #[test]
    fn test_from_grid_empty_sheet() {
        let table = Table::from_grid("Blank", vec![vec![], vec![CellValue::Empty]]).unwrap();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    fn cell_strategy() -> impl Strategy<Value = CellValue> {
        prop_oneof![
            Just(CellValue::Empty),
            any::<bool>().prop_map(CellValue::Boolean),
            (-1000i32..1000).prop_map(CellValue::from),
            "[a-z]{0,4}".prop_map(CellValue::from),
        ]
    }

    proptest! {
        #[test]
        fn prop_non_null_within_row_count(
            grid in prop::collection::vec(prop::collection::vec(cell_strategy(), 0..6), 0..12)
        ) {
            let table = Table::from_grid("Sheet", grid).unwrap();
            let rows = table.row_count();
            let total: usize = table.columns().iter().map(Column::non_null).sum();

            for column in table.columns() {
                prop_assert!(column.non_null() <= rows);
            }
            prop_assert!(total <= table.column_count() * rows);
            for row in table.rows() {
                prop_assert_eq!(row.len(), table.column_count());
            }
        }
    }
}
