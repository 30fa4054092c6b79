//! Multi-file import sessions.
//!
//! A session owns the sink and a running index of the tables written so
//! far. Files are processed one at a time in the order given; a file that
//! cannot be read or decoded is recorded as skipped and the session moves
//! on. Only sink failures stop the run, since they concern the shared
//! output rather than a single file.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ImportError, Result};
use crate::importer::{ImportedTable, Importer};
use crate::sink::{SheetPlacement, TableSink};

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Written to a sheet.
    Imported {
        file: String,
        sheet: String,
        rows: usize,
        columns: usize,
        numeric_columns: Vec<usize>,
    },
    /// Nothing to write.
    Empty { file: String },
    /// Could not be read or decoded.
    Skipped { file: String, reason: String },
}

impl FileOutcome {
    /// Input label the outcome refers to.
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Imported { file, .. }
            | FileOutcome::Empty { file }
            | FileOutcome::Skipped { file, .. } => file,
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, FileOutcome::Imported { .. })
    }
}

/// Outcomes of every input handed to a session, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub outcomes: Vec<FileOutcome>,
}

impl ImportReport {
    /// Number of inputs written to a sheet.
    pub fn imported_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_imported()).count()
    }

    /// Number of inputs with nothing to write.
    pub fn empty_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Empty { .. }))
            .count()
    }

    /// Number of inputs that failed to read or decode.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
            .count()
    }
}

/// Sequential import of several inputs into one sink.
#[derive(Debug)]
pub struct ImportSession<S: TableSink> {
    importer: Importer,
    sink: S,
    file_index: usize,
    report: ImportReport,
}

impl<S: TableSink> ImportSession<S> {
    /// Start a session writing into `sink`.
    pub fn new(importer: Importer, sink: S) -> Self {
        Self {
            importer,
            sink,
            file_index: 0,
            report: ImportReport::default(),
        }
    }

    /// Number of tables written so far. The next table goes to the active
    /// sheet only while this is zero.
    pub fn file_index(&self) -> usize {
        self.file_index
    }

    pub fn importer(&self) -> &Importer {
        &self.importer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn report(&self) -> &ImportReport {
        &self.report
    }

    /// Hand an already-built table to the sink.
    pub fn write(&mut self, table: &ImportedTable, label: &str) -> Result<FileOutcome> {
        let outcome = if table.is_empty() {
            debug!(file = label, "nothing to import");
            FileOutcome::Empty {
                file: label.to_string(),
            }
        } else {
            let placement = SheetPlacement::for_index(self.file_index);
            let sheet = self.sink.write_table(table, placement)?;
            self.file_index += 1;

            FileOutcome::Imported {
                file: label.to_string(),
                sheet,
                rows: table.row_count(),
                columns: table.column_count(),
                numeric_columns: table.mask.numeric_columns().collect(),
            }
        };

        self.report.outcomes.push(outcome.clone());
        Ok(outcome)
    }

    /// Import decoded text under the given label and sheet name.
    pub fn import_text(
        &mut self,
        label: &str,
        text: &str,
        sheet_name: Option<String>,
    ) -> Result<FileOutcome> {
        let table = self.importer.import_text(text, sheet_name);
        self.write(&table, label)
    }

    /// Import bytes read from `path`. Decoding failures skip the file.
    pub fn import_bytes(&mut self, bytes: &[u8], path: impl AsRef<Path>) -> Result<FileOutcome> {
        let path = path.as_ref();
        let label = path.display().to_string();

        match self.importer.import_bytes(bytes, path) {
            Ok(table) => self.write(&table, &label),
            Err(e @ ImportError::Decode { .. }) => Ok(self.skip(label, &e)),
            Err(e) => Err(e),
        }
    }

    /// Read a file asynchronously and import it. Read failures skip the file.
    pub async fn import_path(&mut self, path: impl AsRef<Path>) -> Result<FileOutcome> {
        let path = path.as_ref();

        match tokio::fs::read(path).await {
            Ok(bytes) => self.import_bytes(&bytes, path),
            Err(e) => {
                let error = ImportError::io(path, e);
                Ok(self.skip(path.display().to_string(), &error))
            }
        }
    }

    /// Import files strictly in the order given.
    pub async fn import_paths<I, P>(&mut self, paths: I) -> Result<&ImportReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.import_path(path).await?;
        }
        Ok(&self.report)
    }

    /// Flush the sink and return it with the report.
    pub fn finish(mut self) -> Result<(S, ImportReport)> {
        self.sink.finish()?;
        Ok((self.sink, self.report))
    }

    fn skip(&mut self, label: String, error: &ImportError) -> FileOutcome {
        warn!(file = %label, error = %error, "skipping file");
        let outcome = FileOutcome::Skipped {
            file: label,
            reason: error.to_string(),
        };
        self.report.outcomes.push(outcome.clone());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::ImporterConfig;
    use crate::sink::Workbook;

    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<(Option<String>, SheetPlacement)>,
        finished: bool,
    }

    impl TableSink for RecordingSink {
        fn write_table(
            &mut self,
            table: &ImportedTable,
            placement: SheetPlacement,
        ) -> Result<String> {
            self.writes.push((table.sheet_name.clone(), placement));
            Ok(format!("sheet{}", self.writes.len()))
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    struct FailingSink;

    impl TableSink for FailingSink {
        fn write_table(&mut self, _: &ImportedTable, _: SheetPlacement) -> Result<String> {
            Err(ImportError::Sink("workbook is read-only".to_string()))
        }
    }

    #[test]
    fn test_first_written_table_gets_active_sheet() {
        let mut session = ImportSession::new(Importer::new(), RecordingSink::default());

        session.import_text("a", "x;y\n1;2", Some("a".into())).unwrap();
        session.import_text("b", "x;y\n3;4", Some("b".into())).unwrap();

        let (sink, report) = session.finish().unwrap();
        assert!(sink.finished);
        assert_eq!(
            sink.writes,
            vec![
                (Some("a".to_string()), SheetPlacement::ActiveSheet),
                (Some("b".to_string()), SheetPlacement::NewSheet),
            ]
        );
        assert_eq!(report.imported_count(), 2);
    }

    #[test]
    fn test_empty_input_does_not_advance_index() {
        let mut session = ImportSession::new(Importer::new(), RecordingSink::default());

        let outcome = session.import_text("blank", "  \r\n", None).unwrap();
        assert_eq!(outcome, FileOutcome::Empty { file: "blank".into() });
        assert_eq!(session.file_index(), 0);

        session.import_text("data", "x,y\n1.5,2", None).unwrap();
        assert_eq!(session.file_index(), 1);
        assert_eq!(session.sink().writes[0].1, SheetPlacement::ActiveSheet);
    }

    #[test]
    fn test_decode_failure_skips_file() {
        let config = ImporterConfig::default().with_strict_decoding(true);
        let mut session = ImportSession::new(Importer::with_config(config), Workbook::new());

        let outcome = session.import_bytes(b"a;\xFF", "bad.csv").unwrap();
        assert!(matches!(outcome, FileOutcome::Skipped { .. }));

        let outcome = session.import_bytes(b"a;b\n1,5;2", "good.csv").unwrap();
        assert!(outcome.is_imported());
        assert_eq!(session.report().skipped_count(), 1);
        assert_eq!(session.sink().sheet_names(), vec!["good"]);
    }

    #[test]
    fn test_sink_failure_propagates() {
        let mut session = ImportSession::new(Importer::new(), FailingSink);
        let err = session.import_text("a", "x;y", None).unwrap_err();
        assert!(matches!(err, ImportError::Sink(_)));
        assert_eq!(session.file_index(), 0);
    }

    #[test]
    fn test_imported_outcome_details() {
        let mut session = ImportSession::new(Importer::new(), Workbook::new());
        let outcome = session
            .import_text("prezzi", "Nome;Prezzo\nPane;1,20\nLatte;0,99", Some("prezzi".into()))
            .unwrap();

        assert_eq!(
            outcome,
            FileOutcome::Imported {
                file: "prezzi".to_string(),
                sheet: "prezzi".to_string(),
                rows: 3,
                columns: 2,
                numeric_columns: vec![1],
            }
        );
    }

    #[tokio::test]
    async fn test_missing_file_skipped_and_loop_continues() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("ok.csv");
        std::fs::write(&good, "a;b\n1,5;x").unwrap();
        let missing = dir.path().join("missing.csv");

        let mut session = ImportSession::new(Importer::new(), Workbook::new());
        let report = session.import_paths([&missing, &good]).await.unwrap();

        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.imported_count(), 1);
        assert_eq!(report.outcomes[0].file(), missing.display().to_string());
        assert_eq!(session.file_index(), 1);
    }
}
