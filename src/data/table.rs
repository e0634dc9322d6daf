//! In-memory table: named columns of equal length

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{GenderizeError, Result};

/// A single table value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Text form used for encoding; nulls become the empty string
    pub fn as_text(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Float(v) => write!(f, "{}", v),
            other => f.write_str(&other.as_text()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<i32> for Cell {
    fn from(v: i32) -> Self {
        Cell::Int(v as i64)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<f32> for Cell {
    fn from(v: f32) -> Self {
        Cell::Float(v as f64)
    }
}

impl From<bool> for Cell {
    fn from(v: bool) -> Self {
        Cell::Bool(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Null)
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Cell>,
}

impl Column {
    pub fn new<I, C>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Column {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column values as text, in row order
    pub fn texts(&self) -> Vec<String> {
        self.values.iter().map(Cell::as_text).collect()
    }
}

/// Rows x named columns. All columns have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking names and lengths
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Table::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Builder-style column append
    pub fn with_column<I, C>(mut self, name: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.push_column(Column::new(name, values))?;
        Ok(self)
    }

    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.column(&column.name).is_some() {
            return Err(GenderizeError::Table(format!(
                "duplicate column '{}'",
                column.name
            )));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(GenderizeError::Table(format!(
                    "column '{}' has {} rows, table has {}",
                    column.name,
                    column.len(),
                    first.len()
                )));
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Append a column, or overwrite the values of an existing one with the same name
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        let rows = self.num_rows();
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => {
                if column.len() != rows {
                    return Err(GenderizeError::Table(format!(
                        "column '{}' has {} rows, table has {}",
                        column.name,
                        column.len(),
                        rows
                    )));
                }
                existing.values = column.values;
                Ok(())
            }
            None => self.push_column(column),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Row `i` as cells in column order
    pub fn row(&self, i: usize) -> Option<Vec<&Cell>> {
        if i >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[i]).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new()
            .with_column("name", ["Juan", "Maria", "Carlos"])
            .unwrap()
            .with_column("age", [25, 30, 35])
            .unwrap()
    }

    #[test]
    fn test_build_table() {
        let table = sample();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert_eq!(table.row(1).unwrap()[0], &Cell::from("Maria"));
        assert!(table.row(3).is_none());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = sample().with_column("city", ["Cali"]);
        assert!(matches!(result, Err(GenderizeError::Table(_))));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = sample().with_column("name", ["a", "b", "c"]);
        assert!(matches!(result, Err(GenderizeError::Table(_))));
    }

    #[test]
    fn test_set_column_overwrites() {
        let mut table = sample();
        table.set_column(Column::new("age", [1, 2, 3])).unwrap();
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column("age").unwrap().values[0], Cell::Int(1));
    }

    #[test]
    fn test_cell_text_coercion() {
        assert_eq!(Cell::Null.as_text(), "");
        assert_eq!(Cell::from(42).as_text(), "42");
        assert_eq!(Cell::from(Some("Ana")).as_text(), "Ana");
        assert_eq!(Cell::from(None::<&str>), Cell::Null);
        assert_eq!(Cell::from(true).as_text(), "true");
    }
}
