//! Grid construction and row alignment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cell::Cell;
use super::tokenizer::{tokenize, Dialect, RowKind};

/// Separator used when folding overflowing cells back into the last column.
const OVERFLOW_SEPARATOR: &str = ",";

/// A row of typed cells.
pub type Row = Vec<Cell>;

/// Parsed rows of one file. Row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Rows in source order.
    pub rows: Vec<Row>,
    /// Dialect each row was tokenized with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dialects: Vec<Dialect>,
}

impl Grid {
    /// Create a grid from rows without dialect information.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            dialects: Vec::new(),
        }
    }

    /// Returns true if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns, taken from the header row.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The header row, if any.
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Header names rendered as strings.
    pub fn header_names(&self) -> Vec<String> {
        self.header()
            .map(|h| h.iter().map(Cell::to_string).collect())
            .unwrap_or_default()
    }

    /// Returns true if every row has the header's length.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Force every row to the header's width.
    ///
    /// Short rows are padded with empty text. Long rows keep their first
    /// `width - 1` cells and fold the rest, joined with a comma, into one
    /// trailing text cell so no content is lost. Running this on an aligned
    /// grid is a no-op.
    pub fn align(&mut self) {
        let width = self.column_count();

        for row in &mut self.rows {
            if width == 0 {
                row.clear();
                continue;
            }

            if row.len() < width {
                row.resize(width, Cell::empty());
            } else if row.len() > width {
                let overflow: Vec<String> =
                    row.drain(width - 1..).map(|c| c.to_string()).collect();
                row.push(Cell::Text(overflow.join(OVERFLOW_SEPARATOR)));
            }
        }
    }

    /// Count rows per dialect, in first-seen order.
    pub fn dialect_counts(&self) -> Vec<(Dialect, usize)> {
        let mut counts: Vec<(Dialect, usize)> = Vec::new();
        for dialect in &self.dialects {
            match counts.iter_mut().find(|(d, _)| d == dialect) {
                Some((_, n)) => *n += 1,
                None => counts.push((*dialect, 1)),
            }
        }
        counts
    }

    /// Short description of the dialects used: a single dialect name,
    /// `mixed`, or `empty`.
    pub fn dialect_summary(&self) -> String {
        match self.dialect_counts().as_slice() {
            [] => "empty".to_string(),
            [(dialect, _)] => dialect.to_string(),
            _ => "mixed".to_string(),
        }
    }
}

/// Builds aligned grids from decoded text.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridBuilder;

impl GridBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Split, tokenize and align a decoded text blob.
    ///
    /// Both CRLF and LF line endings are accepted and blank lines are
    /// skipped. Input without any non-blank line yields an empty grid.
    ///
    /// # Example
    ///
    /// ```
    /// use csvsheet::{Cell, GridBuilder};
    ///
    /// let grid = GridBuilder::new().build("a;b;c\n1;2\n");
    /// assert_eq!(grid.column_count(), 3);
    /// assert_eq!(grid.rows[1][2], Cell::Text(String::new()));
    /// ```
    pub fn build(&self, text: &str) -> Grid {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

        if lines.is_empty() {
            debug!("no non-blank lines, returning empty grid");
            return Grid::default();
        }

        let mut rows = Vec::with_capacity(lines.len());
        let mut dialects = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            dialects.push(Dialect::detect(line));
            rows.push(tokenize(line, RowKind::from_index(index)));
        }

        let mut grid = Grid { rows, dialects };
        grid.align();

        debug!(
            rows = grid.row_count(),
            columns = grid.column_count(),
            dialect = %grid.dialect_summary(),
            "built grid"
        );

        grid
    }
}
