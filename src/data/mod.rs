//! Tabular input and output
//!
//! The in-memory table, name column resolution and CSV conversion.

pub mod columns;
pub mod csv;
pub mod table;

pub use columns::ColumnResolver;
pub use table::{Cell, Column, Table};
