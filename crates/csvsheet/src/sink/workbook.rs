//! In-memory workbook sink and its JSON file wrapper.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::format::{autofit_widths, render_table, NumberFormat};
use super::naming::{sanitize_sheet_name, unique_sheet_name};
use super::{SheetPlacement, TableSink};
use crate::error::{ImportError, Result};
use crate::importer::ImportedTable;
use crate::input::Cell;

/// Name of the sheet a new workbook starts with.
pub const INITIAL_SHEET_NAME: &str = "Sheet1";

/// One sheet: cell values plus presentation hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    /// Cell values anchored at the top-left corner.
    pub rows: Vec<Vec<Cell>>,
    /// Number format per column, `None` for general formatting.
    pub number_formats: Vec<Option<NumberFormat>>,
    /// Whether the first row is rendered bold.
    pub bold_header: bool,
    /// Column widths in characters.
    pub column_widths: Vec<usize>,
    /// Values as displayed, with number formats applied.
    pub display: Vec<Vec<String>>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if the sheet holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Displayed text of a cell.
    pub fn display_value(&self, row: usize, col: usize) -> Option<&str> {
        self.display.get(row)?.get(col).map(String::as_str)
    }

    fn fill(&mut self, table: &ImportedTable, format: &NumberFormat) {
        let display = render_table(table, format);

        self.rows = table.grid.rows.clone();
        self.number_formats = (0..table.column_count())
            .map(|col| table.mask.is_numeric(col).then(|| format.clone()))
            .collect();
        self.bold_header = true;
        self.column_widths = autofit_widths(&display);
        self.display = display;
    }
}

/// An ordered collection of sheets with one active sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    sheets: IndexMap<String, Sheet>,
    active: String,
    number_format: NumberFormat,
}

impl Workbook {
    /// Create a workbook with a single empty active sheet.
    pub fn new() -> Self {
        Self::with_number_format(NumberFormat::default())
    }

    /// Create a workbook that formats numeric columns with `format`.
    pub fn with_number_format(format: NumberFormat) -> Self {
        let mut sheets = IndexMap::new();
        sheets.insert(INITIAL_SHEET_NAME.to_string(), Sheet::new(INITIAL_SHEET_NAME));

        Self {
            sheets,
            active: INITIAL_SHEET_NAME.to_string(),
            number_format: format,
        }
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// A workbook always holds at least its active sheet.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheet names in order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Get a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    /// Iterate sheets in order.
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.values()
    }

    /// The active sheet.
    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(&self.active)
    }

    /// Save the workbook as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ImportError::io(parent, e))?;
            }
        }

        let file = File::create(path).map_err(|e| ImportError::io(path, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;

        Ok(())
    }

    fn rename_active(&mut self, new_name: &str) {
        if self.active == new_name {
            return;
        }

        let active = std::mem::replace(&mut self.active, new_name.to_string());
        self.sheets = std::mem::take(&mut self.sheets)
            .into_iter()
            .map(|(name, mut sheet)| {
                if name == active {
                    sheet.name = new_name.to_string();
                    (new_name.to_string(), sheet)
                } else {
                    (name, sheet)
                }
            })
            .collect();
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSink for Workbook {
    fn write_table(&mut self, table: &ImportedTable, placement: SheetPlacement) -> Result<String> {
        let name = match placement {
            SheetPlacement::ActiveSheet => {
                let name = match &table.sheet_name {
                    Some(base) => unique_sheet_name(
                        &sanitize_sheet_name(base),
                        self.sheets
                            .keys()
                            .filter(|k| **k != self.active)
                            .map(String::as_str),
                    ),
                    None => self.active.clone(),
                };
                self.rename_active(&name);
                name
            }
            SheetPlacement::NewSheet => {
                let base = table
                    .sheet_name
                    .as_deref()
                    .map(sanitize_sheet_name)
                    .unwrap_or_else(|| format!("Sheet{}", self.sheets.len() + 1));
                let name = unique_sheet_name(&base, self.sheets.keys().map(String::as_str));
                self.sheets.insert(name.clone(), Sheet::new(name.clone()));
                name
            }
        };

        let sheet = self
            .sheets
            .get_mut(&name)
            .ok_or_else(|| ImportError::Sink(format!("Sheet '{}' disappeared", name)))?;
        sheet.fill(table, &self.number_format);

        info!(
            sheet = %name,
            rows = table.row_count(),
            columns = table.column_count(),
            "wrote sheet"
        );

        Ok(name)
    }
}

/// Collects tables into a [`Workbook`] and saves it as JSON on finish.
#[derive(Debug)]
pub struct JsonWorkbookSink {
    workbook: Workbook,
    path: PathBuf,
}

impl JsonWorkbookSink {
    pub fn new(path: impl Into<PathBuf>, format: NumberFormat) -> Self {
        Self {
            workbook: Workbook::with_number_format(format),
            path: path.into(),
        }
    }

    /// The workbook built so far.
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSink for JsonWorkbookSink {
    fn write_table(&mut self, table: &ImportedTable, placement: SheetPlacement) -> Result<String> {
        self.workbook.write_table(table, placement)
    }

    fn finish(&mut self) -> Result<()> {
        self.workbook.save(&self.path)?;
        info!(path = %self.path.display(), sheets = self.workbook.len(), "saved workbook");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::Importer;

    fn table(text: &str, name: Option<&str>) -> ImportedTable {
        Importer::new().import_text(text, name.map(String::from))
    }

    #[test]
    fn test_first_table_goes_to_active_sheet() {
        let mut wb = Workbook::new();
        let name = wb
            .write_table(&table("a;b\n1,5;x", Some("vendite")), SheetPlacement::ActiveSheet)
            .unwrap();

        assert_eq!(name, "vendite");
        assert_eq!(wb.sheet_names(), vec!["vendite"]);
        assert_eq!(wb.active_sheet().unwrap().name, "vendite");
    }

    #[test]
    fn test_active_sheet_keeps_name_without_suggestion() {
        let mut wb = Workbook::new();
        let name = wb
            .write_table(&table("a;b\n1;2", None), SheetPlacement::ActiveSheet)
            .unwrap();
        assert_eq!(name, INITIAL_SHEET_NAME);
    }

    #[test]
    fn test_suggested_names_are_sanitized() {
        let mut wb = Workbook::new();
        let first = wb
            .write_table(&table("a;b", Some("")), SheetPlacement::ActiveSheet)
            .unwrap();
        let second = wb
            .write_table(&table("a;b", Some("Q1: [draft]")), SheetPlacement::NewSheet)
            .unwrap();

        assert_eq!(first, "Sheet");
        assert_eq!(second, "Q1 draft");
        assert_eq!(wb.sheet_names(), vec!["Sheet", "Q1 draft"]);
    }

    #[test]
    fn test_new_sheets_are_appended_with_unique_names() {
        let mut wb = Workbook::new();
        wb.write_table(&table("a;b", Some("dati")), SheetPlacement::ActiveSheet)
            .unwrap();
        let second = wb
            .write_table(&table("c;d", Some("dati")), SheetPlacement::NewSheet)
            .unwrap();
        let third = wb
            .write_table(&table("e;f", None), SheetPlacement::NewSheet)
            .unwrap();

        assert_eq!(second, "dati (2)");
        assert_eq!(third, "Sheet3");
        assert_eq!(wb.sheet_names(), vec!["dati", "dati (2)", "Sheet3"]);
        assert_eq!(wb.active_sheet().unwrap().name, "dati");
    }

    #[test]
    fn test_presentation_hints() {
        let mut wb = Workbook::new();
        let name = wb
            .write_table(
                &table("Nome;Prezzo\nParmigiano;12,5\nPane;1,2", None),
                SheetPlacement::ActiveSheet,
            )
            .unwrap();
        let sheet = wb.sheet(&name).unwrap();

        assert!(sheet.bold_header);
        assert_eq!(sheet.number_formats, vec![None, Some(NumberFormat::default())]);
        assert_eq!(sheet.display_value(1, 1), Some("12.50"));
        assert_eq!(sheet.display_value(2, 1), Some("1.20"));
        assert_eq!(sheet.column_widths, vec![10, 6]);
        assert_eq!(sheet.rows[1][1], Cell::Number(12.5));
    }

    #[test]
    fn test_save_and_reload_with_nan_and_overflowing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");

        let mut wb = Workbook::new();
        wb.write_table(
            &table("a;b\n1e999.5;x\nv1,5;y", Some("dati")),
            SheetPlacement::ActiveSheet,
        )
        .unwrap();
        wb.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let reloaded: Workbook = serde_json::from_str(&text).unwrap();
        assert_eq!(reloaded, wb);

        let sheet = reloaded.sheet("dati").unwrap();
        assert_eq!(sheet.rows[1][0], Cell::Text("1e999.5".to_string()));
        assert_eq!(sheet.rows[2][0], Cell::Number(f64::NAN));
        assert_eq!(sheet.display_value(2, 0), Some(""));
    }

    #[test]
    fn test_save_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("book.json");

        let mut sink = JsonWorkbookSink::new(&path, NumberFormat::default());
        sink.write_table(&table("a;b\n1,5;x", Some("s")), SheetPlacement::ActiveSheet)
            .unwrap();
        sink.finish().unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["active"], "s");
        assert_eq!(json["sheets"]["s"]["rows"][1][0], 1.5);
        assert_eq!(json["sheets"]["s"]["number_formats"][0], "0.00");
    }
}
