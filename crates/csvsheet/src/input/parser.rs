//! File parser: bytes to decoded text to aligned grid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{Grid, GridBuilder};
use super::source::{decode_bytes, encoding_for_label, hash_bytes, SourceMetadata};
use crate::error::{ImportError, Result};

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Encoding label used when the file has no byte-order mark.
    pub encoding: String,
    /// Reject files with malformed byte sequences instead of replacing them.
    pub strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_string(),
            strict: false,
        }
    }
}

/// Parses delimited text files into grids.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
    builder: GridBuilder,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            builder: GridBuilder::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read and parse a file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Grid, SourceMetadata)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| ImportError::io(path, e))?;
        self.parse_bytes(&contents, path)
    }

    /// Parse raw bytes that were read from `path`.
    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        path: impl AsRef<Path>,
    ) -> Result<(Grid, SourceMetadata)> {
        let path = path.as_ref();
        let encoding = encoding_for_label(&self.config.encoding)?;
        let decoded = decode_bytes(bytes, encoding, self.config.strict, path)?;

        if decoded.had_errors {
            debug!(path = %path.display(), "replaced malformed byte sequences");
        }

        let grid = self.parse_str(&decoded.text);

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash_bytes(bytes),
            bytes.len() as u64,
            decoded.encoding.name().to_string(),
            grid.dialect_summary(),
            grid.row_count(),
            grid.column_count(),
        );

        Ok((grid, metadata))
    }

    /// Parse already-decoded text.
    pub fn parse_str(&self, text: &str) -> Grid {
        self.builder.build(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Cell;

    #[test]
    fn test_parse_bytes_metadata() {
        let parser = Parser::new();
        let (grid, meta) = parser
            .parse_bytes(b"Nome;Prezzo\r\nPane;1,20\r\n", "listino.csv")
            .unwrap();

        assert_eq!(grid.rows[1][1], Cell::Number(1.2));
        assert_eq!(meta.file, "listino.csv");
        assert_eq!(meta.dialect, "semicolon");
        assert_eq!(meta.encoding, "UTF-8");
        assert_eq!(meta.row_count, 2);
        assert_eq!(meta.column_count, 2);
        assert_eq!(meta.size_bytes, 24);
        assert!(meta.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_parse_bytes_custom_encoding() {
        let parser = Parser::with_config(ParserConfig {
            encoding: "windows-1252".to_string(),
            strict: true,
        });
        let (grid, meta) = parser.parse_bytes(b"Citt\xE0;n\r\nRoma;1", "c.csv").unwrap();
        assert_eq!(grid.rows[0][0], Cell::Text("Città".to_string()));
        assert_eq!(meta.encoding, "windows-1252");
    }

    #[test]
    fn test_parse_bytes_bad_label() {
        let parser = Parser::with_config(ParserConfig {
            encoding: "nope".to_string(),
            strict: false,
        });
        assert!(matches!(
            parser.parse_bytes(b"a,b", "x.csv"),
            Err(ImportError::Config(_))
        ));
    }

    #[test]
    fn test_parse_file_missing() {
        let parser = Parser::new();
        let err = parser.parse_file("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[test]
    fn test_parse_empty_bytes() {
        let (grid, meta) = Parser::new().parse_bytes(b"", "empty.csv").unwrap();
        assert!(grid.is_empty());
        assert_eq!(meta.dialect, "empty");
    }
}
