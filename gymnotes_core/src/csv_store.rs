//! CSV-file table store.
//!
//! Each table lives in `<dir>/<table>.csv` with no header handling of its
//! own: header rows are ordinary rows. Appends lock the file and write in
//! place; every other mutation rewrites the table through a synced temp file
//! that is renamed over the original.

use crate::error::{Error, Result};
use crate::gateway::{remove_row, set_cell, Rows, TableGateway};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Table store backed by one CSV file per table
#[derive(Clone, Debug)]
pub struct CsvGateway {
    dir: PathBuf,
}

impl CsvGateway {
    /// Open (and create if needed) a table directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!("Opened table directory {:?}", dir);
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a table; names are limited to `[A-Za-z0-9_-]+`
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        let valid = !table.is_empty()
            && table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Gateway(format!("invalid table name '{}'", table)));
        }
        Ok(self.dir.join(format!("{}.csv", table)))
    }

    fn read_rows(&self, path: &Path) -> Result<Rows> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(&file);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(String::from).collect());
        }

        file.unlock()?;
        tracing::debug!("Read {} rows from {:?}", rows.len(), path);
        Ok(rows)
    }

    /// Atomically replace the table contents
    fn write_rows(&self, path: &Path, rows: &Rows) -> Result<()> {
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(temp.as_file());
            for row in rows {
                writer.write_record(storable(row))?;
            }
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Rewrote {:?} with {} rows", path, rows.len());
        Ok(())
    }

    fn rewrite<F>(&self, table: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Rows) -> Result<()>,
    {
        let path = self.table_path(table)?;
        let mut rows = self.read_rows(&path)?;
        f(&mut rows)?;
        self.write_rows(&path, &rows)
    }
}

/// A zero-cell row would be written as a blank line, which the reader skips
fn storable(row: &[String]) -> Vec<&str> {
    if row.is_empty() {
        vec![""]
    } else {
        row.iter().map(String::as_str).collect()
    }
}

impl TableGateway for CsvGateway {
    fn append_row(&mut self, table: &str, values: &[String]) -> Result<()> {
        let path = self.table_path(table)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.lock_exclusive()?;

        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(&file);
            writer.write_record(storable(values))?;
            writer.flush()?;
        }

        file.unlock()?;
        tracing::debug!("Appended row to table '{}'", table);
        Ok(())
    }

    fn get_all_rows(&self, table: &str) -> Result<Rows> {
        let path = self.table_path(table)?;
        self.read_rows(&path)
    }

    fn update_cell(&mut self, table: &str, row: usize, col: usize, value: &str) -> Result<()> {
        self.rewrite(table, |rows| set_cell(rows, table, row, col, value))
    }

    fn delete_row(&mut self, table: &str, row: usize) -> Result<()> {
        self.rewrite(table, |rows| remove_row(rows, table, row))
    }

    fn clear(&mut self, table: &str) -> Result<()> {
        let path = self.table_path(table)?;
        self.write_rows(&path, &Vec::new())
    }
}
