//! Minimal CSV reading and writing for tables
//!
//! Handles a header row, comma separators, double-quoted fields with `""`
//! escapes and embedded newlines. Empty fields load as `Cell::Null`.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use crate::data::{Cell, Column, Table};
use crate::{GenderizeError, Result};

/// Read a CSV file into a table of text cells
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    parse_csv(BufReader::new(file))
}

/// Parse CSV from any reader
pub fn parse_csv<R: BufRead>(mut reader: R) -> Result<Table> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let mut records = split_records(&content)?.into_iter();
    let header = match records.next() {
        Some(h) => h,
        None => return Ok(Table::new()),
    };

    let mut values: Vec<Vec<Cell>> = vec![Vec::new(); header.len()];
    for (line, record) in records.enumerate() {
        // A blank line is a missing value in a single-column file
        if header.len() > 1 && record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() != header.len() {
            return Err(GenderizeError::Parse(format!(
                "record {} has {} fields, header has {}",
                line + 2,
                record.len(),
                header.len()
            )));
        }
        for (column, field) in values.iter_mut().zip(record) {
            column.push(if field.is_empty() {
                Cell::Null
            } else {
                Cell::Text(field)
            });
        }
    }

    let columns = header
        .into_iter()
        .zip(values)
        .map(|(name, values)| Column {
            name: name.trim().to_string(),
            values,
        })
        .collect();
    Table::from_columns(columns)
}

fn split_records(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(GenderizeError::Parse("unterminated quoted field".into()));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

/// Write a table as CSV
pub fn write_csv<W: Write>(table: &Table, mut writer: W) -> Result<()> {
    let header: Vec<String> = table.column_names().iter().map(|n| quote(n)).collect();
    writeln!(writer, "{}", header.join(","))?;

    for i in 0..table.num_rows() {
        if let Some(row) = table.row(i) {
            let fields: Vec<String> = row.iter().map(|c| quote(&c.to_string())).collect();
            writeln!(writer, "{}", fields.join(","))?;
        }
    }
    Ok(())
}

/// Write a table to a CSV file
pub fn write_csv_file<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv(table, std::io::BufWriter::new(file))
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
