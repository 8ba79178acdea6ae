//! Row-level access to named tables.
//!
//! Rows and columns are addressed 1-based, the way spreadsheet cells are.
//! [`MemoryGateway`] keeps tables in memory; see [`crate::csv_store`] for
//! the file-backed store used by the binary.

use crate::error::{Error, Result};
use crate::types::{FEATURES_TABLE, USER_TABLE};
use std::collections::HashMap;

/// A table is a list of rows, each a list of cell texts
pub type Rows = Vec<Vec<String>>;

/// One data row keyed by the header row of its table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Cell text under `column`, if the header has that column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// (column, value) pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Storage operations needed by the workflow
pub trait TableGateway {
    fn append_row(&mut self, table: &str, values: &[String]) -> Result<()>;

    /// Every row of the table, header rows included
    fn get_all_rows(&self, table: &str) -> Result<Rows>;

    fn update_cell(&mut self, table: &str, row: usize, col: usize, value: &str) -> Result<()>;

    fn delete_row(&mut self, table: &str, row: usize) -> Result<()>;

    fn clear(&mut self, table: &str) -> Result<()>;

    /// Data rows mapped by the first row of the table
    fn get_all_records(&self, table: &str) -> Result<Vec<Record>> {
        Ok(records_from_rows(&self.get_all_rows(table)?))
    }
}

/// Map every row after the first onto the first row's column names.
///
/// Missing trailing cells read as empty text; cells past the header are dropped.
pub fn records_from_rows(rows: &[Vec<String>]) -> Vec<Record> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };

    data.iter()
        .map(|row| Record {
            fields: header
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect(),
        })
        .collect()
}

/// Overwrite one cell, padding the row with empty cells if it is too short
pub(crate) fn set_cell(
    rows: &mut Rows,
    table: &str,
    row: usize,
    col: usize,
    value: &str,
) -> Result<()> {
    let index = row_index(rows, table, row)?;
    if col == 0 {
        return Err(Error::Gateway(format!(
            "column 0 is out of range for table '{}'",
            table
        )));
    }

    let cells = &mut rows[index];
    if cells.len() < col {
        cells.resize(col, String::new());
    }
    cells[col - 1] = value.to_string();
    Ok(())
}

/// Remove one row, shifting the rows below it up
pub(crate) fn remove_row(rows: &mut Rows, table: &str, row: usize) -> Result<()> {
    let index = row_index(rows, table, row)?;
    rows.remove(index);
    Ok(())
}

fn row_index(rows: &Rows, table: &str, row: usize) -> Result<usize> {
    if row == 0 || row > rows.len() {
        return Err(Error::Gateway(format!(
            "row {} is out of range for table '{}' ({} rows)",
            row,
            table,
            rows.len()
        )));
    }
    Ok(row - 1)
}

/// In-memory tables, pre-created for `user` and `features`
#[derive(Clone, Debug)]
pub struct MemoryGateway {
    tables: HashMap<String, Rows>,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::with_tables(&[USER_TABLE, FEATURES_TABLE])
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty tables with the given names
    pub fn with_tables(names: &[&str]) -> Self {
        Self {
            tables: names.iter().map(|n| (n.to_string(), Vec::new())).collect(),
        }
    }

    fn table(&self, name: &str) -> Result<&Rows> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::Gateway(format!("table '{}' not found", name)))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Rows> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::Gateway(format!("table '{}' not found", name)))
    }
}

impl TableGateway for MemoryGateway {
    fn append_row(&mut self, table: &str, values: &[String]) -> Result<()> {
        self.table_mut(table)?.push(values.to_vec());
        Ok(())
    }

    fn get_all_rows(&self, table: &str) -> Result<Rows> {
        Ok(self.table(table)?.clone())
    }

    fn update_cell(&mut self, table: &str, row: usize, col: usize, value: &str) -> Result<()> {
        set_cell(self.table_mut(table)?, table, row, col, value)
    }

    fn delete_row(&mut self, table: &str, row: usize) -> Result<()> {
        remove_row(self.table_mut(table)?, table, row)
    }

    fn clear(&mut self, table: &str) -> Result<()> {
        self.table_mut(table)?.clear();
        Ok(())
    }
}
