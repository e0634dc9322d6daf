//! Name column resolution
//!
//! An explicit column must exist as given. Otherwise candidate aliases are
//! checked in priority order against the table's column names, ignoring case.

use crate::data::Table;
use crate::{ColumnLookup, GenderizeError, Result};

/// Default aliases, highest priority first
pub const DEFAULT_ALIASES: &[&str] = &[
    "name",
    "nombre",
    "first_name",
    "firstname",
    "primer_nombre",
    "nombres",
    "given_name",
];

/// Finds the column holding names
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    aliases: Vec<String>,
}

impl Default for ColumnResolver {
    fn default() -> Self {
        ColumnResolver::new(DEFAULT_ALIASES.iter().map(|a| a.to_string()).collect())
    }
}

impl ColumnResolver {
    pub fn new(aliases: Vec<String>) -> Self {
        ColumnResolver { aliases }
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Resolve the name column of `table`
    pub fn resolve(&self, table: &Table, explicit: Option<&str>) -> Result<String> {
        let names = table.column_names();

        if let Some(column) = explicit {
            return if names.iter().any(|n| n == column) {
                Ok(column.to_string())
            } else {
                Err(GenderizeError::ColumnNotFound(ColumnLookup::Explicit {
                    column: column.to_string(),
                    available: names,
                }))
            };
        }

        let lowered: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        for alias in &self.aliases {
            let alias = alias.to_lowercase();
            if let Some(index) = lowered.iter().position(|n| *n == alias) {
                return Ok(names[index].clone());
            }
        }

        Err(GenderizeError::ColumnNotFound(ColumnLookup::Aliases {
            tried: self.aliases.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(columns: &[&str]) -> Table {
        let mut table = Table::new();
        for c in columns {
            table = table.with_column(*c, ["x"]).unwrap();
        }
        table
    }

    #[test]
    fn test_resolve_name() {
        let table = table_with(&["id", "name", "age"]);
        assert_eq!(ColumnResolver::default().resolve(&table, None).unwrap(), "name");
    }

    #[test]
    fn test_resolve_nombre() {
        let table = table_with(&["id", "nombre", "edad"]);
        assert_eq!(ColumnResolver::default().resolve(&table, None).unwrap(), "nombre");
    }

    #[test]
    fn test_resolve_first_name() {
        let table = table_with(&["id", "first_name", "last_name"]);
        assert_eq!(
            ColumnResolver::default().resolve(&table, None).unwrap(),
            "first_name"
        );
    }

    #[test]
    fn test_priority_follows_alias_order() {
        // Column order in the table does not matter, alias order does
        let table = table_with(&["first_name", "nombre"]);
        assert_eq!(ColumnResolver::default().resolve(&table, None).unwrap(), "nombre");
    }

    #[test]
    fn test_case_insensitive_keeps_original_spelling() {
        let table = table_with(&["ID", "Nombre"]);
        assert_eq!(ColumnResolver::default().resolve(&table, None).unwrap(), "Nombre");
    }

    #[test]
    fn test_explicit_column() {
        let table = table_with(&["name", "alias"]);
        assert_eq!(
            ColumnResolver::default().resolve(&table, Some("alias")).unwrap(),
            "alias"
        );
    }

    #[test]
    fn test_explicit_missing_does_not_fall_back() {
        let table = table_with(&["name"]);
        let err = ColumnResolver::default()
            .resolve(&table, Some("doesnotexist"))
            .unwrap_err();
        match err {
            GenderizeError::ColumnNotFound(ColumnLookup::Explicit { column, .. }) => {
                assert_eq!(column, "doesnotexist")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_alias_matches() {
        let table = table_with(&["id", "age", "city"]);
        let err = ColumnResolver::default().resolve(&table, None).unwrap_err();
        assert!(matches!(
            err,
            GenderizeError::ColumnNotFound(ColumnLookup::Aliases { .. })
        ));
        assert!(err.to_string().contains("primer_nombre"));
    }

    #[test]
    fn test_custom_aliases() {
        let table = table_with(&["cliente"]);
        let resolver = ColumnResolver::new(vec!["cliente".to_string()]);
        assert_eq!(resolver.resolve(&table, None).unwrap(), "cliente");
    }
}
