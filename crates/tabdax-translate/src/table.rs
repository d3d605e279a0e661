//! Target table naming

use serde::Serialize;
use std::fmt;

/// Table name used when none is configured
pub const DEFAULT_TABLE_NAME: &str = "Table";

/// The DAX table every generated template is qualified against
///
/// DAX accepts a bare table name only when it is a plain identifier, so
/// [`TableName::bare`] quotes anything else. Templates that always quote
/// use [`TableName::quoted`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableName(String);

impl TableName {
    /// Create a table name; surrounding whitespace and quotes are dropped
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim().trim_matches('\'').trim();
        if name.is_empty() {
            Self(DEFAULT_TABLE_NAME.to_string())
        } else {
            Self(name.to_string())
        }
    }

    /// The raw name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `'Name'`, with embedded quotes doubled
    pub fn quoted(&self) -> String {
        format!("'{}'", self.0.replace('\'', "''"))
    }

    /// `Name` if it is a plain identifier, otherwise the quoted form
    pub fn bare(&self) -> String {
        if is_plain_identifier(&self.0) {
            self.0.clone()
        } else {
            self.quoted()
        }
    }

    /// `'Name'[column]`
    pub fn column(&self, column: &str) -> String {
        format!("{}[{}]", self.quoted(), column)
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE_NAME.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strip surrounding whitespace and field brackets: ` [Sales] ` → `Sales`
pub fn clean_field(field: &str) -> &str {
    field
        .trim()
        .trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_quoted() {
        let table = TableName::new("Sales");
        assert_eq!(table.bare(), "Sales");
        assert_eq!(table.quoted(), "'Sales'");

        let table = TableName::new("Sales Data");
        assert_eq!(table.bare(), "'Sales Data'");
        assert_eq!(table.column("Region"), "'Sales Data'[Region]");

        let table = TableName::new("O'Brien");
        assert_eq!(table.quoted(), "'O''Brien'");
    }

    #[test]
    fn test_empty_name_falls_back_to_default() {
        assert_eq!(TableName::new("  ").as_str(), DEFAULT_TABLE_NAME);
        assert_eq!(TableName::new("'Orders'").as_str(), "Orders");
    }

    #[test]
    fn test_clean_field() {
        assert_eq!(clean_field(" [Region] "), "Region");
        assert_eq!(clean_field("[ Region ]"), "Region");
        assert_eq!(clean_field("Region"), "Region");
        assert_eq!(clean_field("[[x]]"), "x");
    }
}
