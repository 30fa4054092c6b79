//! Table sinks: destinations that lay imported tables out as sheets.
//!
//! A sink receives an aligned grid with its numeric mask and decides where
//! the table lands. It is also responsible for presentation: applying the
//! number format to numeric columns, marking the header bold and sizing
//! columns to their content.

mod directory;
mod format;
mod naming;
mod workbook;

pub use directory::CsvDirectorySink;
pub use format::{autofit_widths, render_cell, render_table, NumberFormat, DEFAULT_NUMBER_FORMAT};
pub use naming::{
    sanitize_sheet_name, sheet_name_from_path, unique_sheet_name, FALLBACK_SHEET_NAME,
    MAX_SHEET_NAME_LEN,
};
pub use workbook::{JsonWorkbookSink, Sheet, Workbook};

use crate::error::Result;
use crate::importer::ImportedTable;

/// Where a table should be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetPlacement {
    /// Reuse the sheet that is active when the session starts.
    ActiveSheet,
    /// Add a new sheet.
    NewSheet,
}

impl SheetPlacement {
    /// The first table of a session goes to the active sheet, the rest to
    /// new sheets.
    pub fn for_index(file_index: usize) -> Self {
        if file_index == 0 {
            SheetPlacement::ActiveSheet
        } else {
            SheetPlacement::NewSheet
        }
    }
}

/// Destination for imported tables.
pub trait TableSink {
    /// Write one table and return the name of the sheet it landed on.
    fn write_table(&mut self, table: &ImportedTable, placement: SheetPlacement) -> Result<String>;

    /// Flush any buffered output. Called once after the last table.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: TableSink + ?Sized> TableSink for Box<S> {
    fn write_table(&mut self, table: &ImportedTable, placement: SheetPlacement) -> Result<String> {
        (**self).write_table(table, placement)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: TableSink + ?Sized> TableSink for &mut S {
    fn write_table(&mut self, table: &ImportedTable, placement: SheetPlacement) -> Result<String> {
        (**self).write_table(table, placement)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
