//! csvsheet: import delimiter-separated text files as typed spreadsheet sheets.
//!
//! Each line picks its own dialect (semicolon, or comma with double-quote
//! awareness), every token is typed as a number or text with decimal
//! commas understood, rows are aligned to the header's width, and columns
//! whose data is entirely numeric are flagged for number formatting.
//! Finished tables are handed to a [`TableSink`], one sheet per file.
//!
//! # Core Principles
//!
//! - **Per-line dialects**: files mixing `;` and `,` lines still import
//! - **No lost content**: overflowing cells are folded into the last column
//! - **IDs stay text**: integers and `Matricola`/`Nr.` columns are never
//!   reformatted as numbers
//!
//! # Example
//!
//! ```
//! use csvsheet::{ImportSession, Importer, Workbook};
//!
//! let mut session = ImportSession::new(Importer::new(), Workbook::new());
//! session
//!     .import_text("prezzi.csv", "Nome;Prezzo\nPane;1,20\n", Some("prezzi".into()))
//!     .unwrap();
//!
//! let (workbook, report) = session.finish().unwrap();
//! assert_eq!(report.imported_count(), 1);
//! assert_eq!(workbook.sheet("prezzi").unwrap().display_value(1, 1), Some("1.20"));
//! ```

pub mod error;
pub mod importer;
pub mod inference;
pub mod input;
pub mod session;
pub mod sink;

pub use error::{ImportError, Result};
pub use importer::{ImportedTable, Importer, ImporterConfig};
pub use inference::{AnalyzerConfig, ColumnTypeAnalyzer, NumericColumnMask};
pub use input::{
    classify, format_number, tokenize, Cell, Dialect, Grid, GridBuilder, Parser, ParserConfig, Row,
    RowKind, SourceMetadata,
};
pub use session::{FileOutcome, ImportReport, ImportSession};
pub use sink::{
    CsvDirectorySink, JsonWorkbookSink, NumberFormat, Sheet, SheetPlacement, TableSink, Workbook,
};
