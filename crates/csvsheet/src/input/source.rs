//! Source decoding and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ImportError, Result};

/// Metadata about an imported source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Encoding the text was decoded with.
    pub encoding: String,
    /// Dialect summary (semicolon, comma, mixed, ...).
    pub dialect: String,
    /// Number of rows including the header.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the import was performed.
    pub imported_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been parsed.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        encoding: String,
        dialect: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            encoding,
            dialect,
            row_count,
            column_count,
            imported_at: Utc::now(),
        }
    }
}

/// Text decoded from raw file bytes.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    /// Encoding actually used (a byte-order mark overrides the requested one).
    pub encoding: &'static Encoding,
    /// Whether malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Look up an encoding by its WHATWG label (`utf-8`, `windows-1252`, ...).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ImportError::Config(format!("Unknown encoding label: {}", label)))
}

/// Decode bytes, honoring a leading byte-order mark.
///
/// In strict mode malformed input is an error; otherwise it is replaced.
pub fn decode_bytes(
    bytes: &[u8],
    encoding: &'static Encoding,
    strict: bool,
    path: impl Into<PathBuf>,
) -> Result<DecodedText> {
    let (text, used, had_errors) = encoding.decode(bytes);

    if strict && had_errors {
        return Err(ImportError::Decode {
            path: path.into(),
            encoding: used.name().to_string(),
        });
    }

    Ok(DecodedText {
        text: text.into_owned(),
        encoding: used,
        had_errors,
    })
}

/// Hash raw bytes as `sha256:<hex>`.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}
