//! Per-column numeric detection.

use serde::{Deserialize, Serialize};

use crate::input::{Cell, Grid};

/// Header keyword for registration-number columns.
pub const DEFAULT_EXCLUDED_HEADER: &str = "matricola";

/// Abbreviation marker for "number" ("Nr.") in header names.
pub const DEFAULT_EXCLUDED_MARKER: &str = "nr.";

/// One flag per column: true when the whole column should be numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericColumnMask(Vec<bool>);

impl NumericColumnMask {
    /// Wrap raw column flags.
    pub fn new(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the mask covers no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flag for a column; out-of-range columns are not numeric.
    pub fn is_numeric(&self, column: usize) -> bool {
        self.0.get(column).copied().unwrap_or(false)
    }

    /// Indices of numeric columns.
    pub fn numeric_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &numeric)| numeric.then_some(i))
    }

    /// Raw flags, one per column.
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

/// Header rules that keep ID-like columns as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Header names (compared case-insensitively) that are never numeric.
    pub excluded_headers: Vec<String>,
    /// Substrings that make a header non-numeric when present.
    pub excluded_markers: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            excluded_headers: vec![DEFAULT_EXCLUDED_HEADER.to_string()],
            excluded_markers: vec![DEFAULT_EXCLUDED_MARKER.to_string()],
        }
    }
}

impl AnalyzerConfig {
    /// Add an excluded header name.
    pub fn with_excluded_header(mut self, name: impl Into<String>) -> Self {
        self.excluded_headers.push(name.into());
        self
    }

    /// Add an excluded header marker.
    pub fn with_excluded_marker(mut self, marker: impl Into<String>) -> Self {
        self.excluded_markers.push(marker.into());
        self
    }
}

/// Decides which columns of a grid are numeric.
#[derive(Debug, Clone)]
pub struct ColumnTypeAnalyzer {
    excluded_headers: Vec<String>,
    excluded_markers: Vec<String>,
}

impl ColumnTypeAnalyzer {
    /// Create an analyzer with the default exclusion rules.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Create an analyzer with custom exclusion rules.
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self {
            excluded_headers: lowercase_all(config.excluded_headers),
            excluded_markers: lowercase_all(config.excluded_markers),
        }
    }

    /// Compute the numeric mask of an aligned grid.
    ///
    /// A column is numeric when its header is not excluded and every data
    /// cell below the header is number-typed. A column with no data rows is
    /// numeric unless its header is excluded.
    pub fn analyze(&self, grid: &Grid) -> NumericColumnMask {
        let Some(header) = grid.header() else {
            return NumericColumnMask::default();
        };

        let flags = header
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let excluded = self.is_excluded_header(name);
                let all_numbers = grid
                    .data_rows()
                    .iter()
                    .all(|row| row.get(col).is_some_and(Cell::is_number));
                !excluded && all_numbers
            })
            .collect();

        NumericColumnMask(flags)
    }

    /// Returns true if a header name forces its column to text.
    pub fn is_excluded_header(&self, header: &Cell) -> bool {
        let name = header.to_string().to_lowercase();
        self.excluded_headers.iter().any(|h| *h == name)
            || self.excluded_markers.iter().any(|m| name.contains(m.as_str()))
    }
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|s| s.to_lowercase()).collect()
}

impl Default for ColumnTypeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
