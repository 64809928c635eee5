//! Expected workbook layout

/// Expected column count per sheet, in declaration order
///
/// Iteration follows insertion order so reports list sheets the same way on
/// every run. Declaring a sheet twice updates its count in place.
///
/// # Example
///
/// ```rust
/// use sheet_review::ExpectedSchema;
///
/// let schema = ExpectedSchema::new()
///     .with_sheet("Accounts", 15)
///     .with_sheet("Contacts", 12);
///
/// let names: Vec<&str> = schema.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["Accounts", "Contacts"]);
/// assert_eq!(schema.get("Contacts"), Some(12));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExpectedSchema {
    sheets: Vec<(String, usize)>,
}

impl ExpectedSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout of the MulaOS database workbook
    pub fn mula_os() -> Self {
        Self::new()
            .with_sheet("Accounts", 15)
            .with_sheet("Contacts", 12)
            .with_sheet("Programs", 22)
            .with_sheet("Projects", 12)
            .with_sheet("Tasks", 15)
            .with_sheet("Activity Log", 10)
            .with_sheet("Lookups", 4)
    }

    /// Builder form of [`ExpectedSchema::insert`]
    pub fn with_sheet<S: Into<String>>(mut self, name: S, columns: usize) -> Self {
        self.insert(name, columns);
        self
    }

    /// Declare a sheet's expected column count
    pub fn insert<S: Into<String>>(&mut self, name: S, columns: usize) {
        let name = name.into();
        match self.sheets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = columns,
            None => self.sheets.push((name, columns)),
        }
    }

    /// Expected column count for a sheet
    pub fn get(&self, name: &str) -> Option<usize> {
        self.sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, columns)| *columns)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.sheets.iter().map(|(name, columns)| (name.as_str(), *columns))
    }

    /// Number of declared sheets
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if no sheets are declared
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ExpectedSchema {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, columns) in iter {
            schema.insert(name, columns);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let schema: ExpectedSchema = [("Zeta", 1), ("Alpha", 2), ("Mid", 3)].into_iter().collect();
        let entries: Vec<(&str, usize)> = schema.iter().collect();
        assert_eq!(entries, vec![("Zeta", 1), ("Alpha", 2), ("Mid", 3)]);
    }

    #[test]
    fn test_redeclare_keeps_position() {
        let schema = ExpectedSchema::new()
            .with_sheet("A", 1)
            .with_sheet("B", 2)
            .with_sheet("A", 9);

        assert_eq!(schema.len(), 2);
        let entries: Vec<(&str, usize)> = schema.iter().collect();
        assert_eq!(entries, vec![("A", 9), ("B", 2)]);
    }

    #[test]
    fn test_mula_os_layout() {
        let schema = ExpectedSchema::mula_os();
        assert_eq!(schema.len(), 7);
        assert_eq!(schema.get("Programs"), Some(22));
        assert_eq!(schema.get("Activity Log"), Some(10));
        assert_eq!(schema.iter().next(), Some(("Accounts", 15)));
        assert_eq!(schema.get("Unknown"), None);
    }
}
