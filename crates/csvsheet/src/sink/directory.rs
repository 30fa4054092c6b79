//! Sink that writes one CSV file per sheet into a directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::format::{render_table, NumberFormat};
use super::naming::{sanitize_sheet_name, unique_sheet_name};
use super::{SheetPlacement, TableSink};
use crate::error::{ImportError, Result};
use crate::importer::ImportedTable;

/// Writes `<dir>/<sheet>.csv` for every table, with numeric columns
/// rendered in the configured number format.
#[derive(Debug)]
pub struct CsvDirectorySink {
    dir: PathBuf,
    delimiter: u8,
    format: NumberFormat,
    sheets: Vec<String>,
    files: Vec<PathBuf>,
}

impl CsvDirectorySink {
    /// Create a sink writing comma-separated files into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            delimiter: b',',
            format: NumberFormat::default(),
            sheets: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Use a different output delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use a different number format for numeric columns.
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl TableSink for CsvDirectorySink {
    fn write_table(&mut self, table: &ImportedTable, placement: SheetPlacement) -> Result<String> {
        if placement == SheetPlacement::ActiveSheet && !self.files.is_empty() {
            return Err(ImportError::Sink(
                "Active sheet requested after tables were already written".to_string(),
            ));
        }

        fs::create_dir_all(&self.dir).map_err(|e| ImportError::io(&self.dir, e))?;

        let base = table
            .sheet_name
            .as_deref()
            .map(sanitize_sheet_name)
            .unwrap_or_else(|| format!("Sheet{}", self.sheets.len() + 1));
        let name = unique_sheet_name(&base, self.sheets.iter().map(String::as_str));
        let path = self.dir.join(format!("{}.csv", name));

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(&path)?;
        for row in render_table(table, &self.format) {
            writer.write_record(&row)?;
        }
        writer.flush().map_err(|e| ImportError::io(&path, e))?;

        info!(sheet = %name, path = %path.display(), rows = table.row_count(), "wrote csv");

        self.sheets.push(name.clone());
        self.files.push(path);
        Ok(name)
    }
}
