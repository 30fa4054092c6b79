//! Importer configuration and the single-file pipeline.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ImportError, Result};
use crate::inference::{AnalyzerConfig, ColumnTypeAnalyzer, NumericColumnMask};
use crate::input::{Grid, Parser, ParserConfig, SourceMetadata};
use crate::sink::{sheet_name_from_path, NumberFormat};

/// Configuration for an import run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// Decoding options.
    pub parser: ParserConfig,
    /// Header exclusion rules for numeric detection.
    pub analyzer: AnalyzerConfig,
    /// Format applied to numeric columns by sinks.
    pub number_format: NumberFormat,
    /// Delimiter used by the CSV directory sink.
    pub output_delimiter: char,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            analyzer: AnalyzerConfig::default(),
            number_format: NumberFormat::default(),
            output_delimiter: ',',
        }
    }
}

impl ImporterConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ImportError::io(path, e))?;
        let config: ImporterConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        crate::input::encoding_for_label(&self.parser.encoding)?;
        if !self.output_delimiter.is_ascii() {
            return Err(ImportError::Config(format!(
                "Output delimiter must be a single ASCII character, got '{}'",
                self.output_delimiter
            )));
        }
        Ok(())
    }

    /// Set the fallback encoding label.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.parser.encoding = label.into();
        self
    }

    /// Reject malformed input bytes instead of replacing them.
    pub fn with_strict_decoding(mut self, strict: bool) -> Self {
        self.parser.strict = strict;
        self
    }

    /// Set the numeric column format.
    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    /// Set the header exclusion rules.
    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Set the CSV output delimiter.
    pub fn with_output_delimiter(mut self, delimiter: char) -> Self {
        self.output_delimiter = delimiter;
        self
    }
}

/// A parsed file ready to hand to a sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedTable {
    /// Aligned grid, row 0 is the header.
    pub grid: Grid,
    /// Numeric flag per column.
    pub mask: NumericColumnMask,
    /// Proposed sheet name, derived from the file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    /// Source file details, when the table came from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
}

impl ImportedTable {
    /// Returns true if there is nothing to write: no rows, or a header
    /// without any recognized delimiter.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty() || self.grid.column_count() == 0
    }

    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }
}

/// Runs decode, grid building and column analysis for one input.
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImporterConfig,
    parser: Parser,
    analyzer: ColumnTypeAnalyzer,
}

impl Importer {
    /// Create an importer with default configuration.
    pub fn new() -> Self {
        Self::with_config(ImporterConfig::default())
    }

    /// Create an importer with custom configuration.
    pub fn with_config(config: ImporterConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let analyzer = ColumnTypeAnalyzer::with_config(config.analyzer.clone());

        Self {
            config,
            parser,
            analyzer,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Import decoded text.
    pub fn import_text(&self, text: &str, sheet_name: Option<String>) -> ImportedTable {
        let grid = self.parser.parse_str(text);
        let mask = self.analyzer.analyze(&grid);

        ImportedTable {
            grid,
            mask,
            sheet_name,
            source: None,
        }
    }

    /// Import raw bytes read from `path`.
    pub fn import_bytes(&self, bytes: &[u8], path: impl AsRef<Path>) -> Result<ImportedTable> {
        let path = path.as_ref();
        let (grid, source) = self.parser.parse_bytes(bytes, path)?;
        let mask = self.analyzer.analyze(&grid);

        debug!(
            file = %source.file,
            rows = grid.row_count(),
            columns = grid.column_count(),
            numeric_columns = mask.numeric_columns().count(),
            "analyzed file"
        );

        Ok(ImportedTable {
            grid,
            mask,
            sheet_name: Some(sheet_name_from_path(path)),
            source: Some(source),
        })
    }

    /// Read and import a file synchronously.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportedTable> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| ImportError::io(path, e))?;
        self.import_bytes(&bytes, path)
    }
}

impl Default for Importer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Cell;

    #[test]
    fn test_import_text() {
        let table = Importer::new().import_text("Nome;Prezzo\nPane;1,20", None);
        assert_eq!(table.mask.as_slice(), &[false, true]);
        assert_eq!(table.grid.rows[1][1], Cell::Number(1.2));
        assert!(table.source.is_none());
    }

    #[test]
    fn test_import_bytes_names_sheet() {
        let table = Importer::new()
            .import_bytes(b"a,b\n1.5,2.5", "/tmp/ordini marzo.csv")
            .unwrap();
        assert_eq!(table.sheet_name.as_deref(), Some("ordini marzo"));
        assert_eq!(table.source.unwrap().file, "ordini marzo.csv");
    }

    #[test]
    fn test_import_empty_text() {
        let table = Importer::new().import_text(" \r\n ", None);
        assert!(table.is_empty());
        assert!(table.mask.is_empty());
    }

    #[test]
    fn test_headerless_table_is_empty() {
        let table = Importer::new().import_text("title only\na,b", None);
        assert_eq!(table.row_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_config_roundtrip_defaults() {
        let config: ImporterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ImporterConfig::default());

        let config: ImporterConfig =
            serde_json::from_str(r#"{"number_format": "0.0", "parser": {"strict": true}}"#)
                .unwrap();
        assert_eq!(config.number_format.decimals(), 1);
        assert!(config.parser.strict);
        assert_eq!(config.parser.encoding, "utf-8");
    }

    #[test]
    fn test_validate() {
        assert!(ImporterConfig::default().validate().is_ok());
        assert!(ImporterConfig::default().with_encoding("bogus").validate().is_err());
        assert!(
            ImporterConfig::default()
                .with_output_delimiter('→')
                .validate()
                .is_err()
        );
    }
}
