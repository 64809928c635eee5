//! Workbook type - the loaded document structure

use crate::table::Table;

/// A workbook: tables in sheet order
///
/// Sheet names are expected to be unique, but nothing here enforces it;
/// lookups by name return the first table in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    tables: Vec<Table>,
}

impl Workbook {
    /// Create an empty workbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workbook from tables in sheet order
    pub fn from_tables(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Append a table after the existing ones
    pub fn push_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Get the number of tables
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Check if the workbook has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get a table by index
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Get the first table with the given name
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// All tables in sheet order
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Sheet names in sheet order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(Table::name)
    }
}
