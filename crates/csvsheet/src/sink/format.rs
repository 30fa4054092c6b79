//! Display formatting applied by sinks: number formats and autofit widths.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};
use crate::importer::ImportedTable;
use crate::input::Cell;

/// Number format applied to numeric columns unless configured otherwise.
pub const DEFAULT_NUMBER_FORMAT: &str = "0.00";

/// A fixed-decimals number format such as `0`, `0.0` or `0.00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberFormat {
    decimals: usize,
}

impl NumberFormat {
    /// Parse a format pattern. Only `0` followed by an optional `.` and
    /// one or more `0`s is supported.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = || ImportError::Config(format!("Unsupported number format: {}", pattern));

        let (int_part, frac_part) = match pattern.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (pattern, None),
        };

        if int_part != "0" {
            return Err(invalid());
        }

        let decimals = match frac_part {
            None => 0,
            Some(f) if !f.is_empty() && f.chars().all(|c| c == '0') => f.len(),
            Some(_) => return Err(invalid()),
        };

        Ok(Self { decimals })
    }

    /// Digits after the decimal point.
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Render a number with this format.
    pub fn render(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            write!(f, "0")
        } else {
            write!(f, "0.{}", "0".repeat(self.decimals))
        }
    }
}

impl TryFrom<String> for NumberFormat {
    type Error = ImportError;

    fn try_from(value: String) -> Result<Self> {
        NumberFormat::parse(&value)
    }
}

impl From<NumberFormat> for String {
    fn from(value: NumberFormat) -> Self {
        value.to_string()
    }
}

/// Render a cell as it would be displayed in its column. NaN cells are
/// displayed blank.
pub fn render_cell(cell: &Cell, numeric_column: bool, format: &NumberFormat) -> String {
    match cell {
        Cell::Number(n) if n.is_nan() => String::new(),
        Cell::Number(n) if numeric_column => format.render(*n),
        other => other.to_string(),
    }
}

/// Render every cell of a table, applying the number format to masked columns.
pub fn render_table(table: &ImportedTable, format: &NumberFormat) -> Vec<Vec<String>> {
    table
        .grid
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, cell)| render_cell(cell, table.mask.is_numeric(col), format))
                .collect()
        })
        .collect()
}

/// Autofit widths: the longest rendered value per column, in characters.
pub fn autofit_widths(rendered: &[Vec<String>]) -> Vec<usize> {
    let width = rendered.first().map(Vec::len).unwrap_or(0);
    (0..width)
        .map(|col| {
            rendered
                .iter()
                .filter_map(|row| row.get(col))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}
