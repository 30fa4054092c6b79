//! Per-line delimiter selection and tokenization.
//!
//! Every line picks its own dialect: semicolon if the line contains one,
//! otherwise comma with quote awareness, otherwise nothing. Files that mix
//! both conventions are handled line by line.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::{classify, Cell};

const QUOTE: char = '"';

/// Delimiter convention selected for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Split strictly on `;`, no quote handling.
    Semicolon,
    /// Split on `,` outside double quotes.
    Comma,
    /// Neither delimiter present; the line yields no cells.
    Unrecognized,
}

impl Dialect {
    /// Select the dialect for a line.
    pub fn detect(line: &str) -> Self {
        if line.contains(';') {
            Dialect::Semicolon
        } else if line.contains(',') {
            Dialect::Comma
        } else {
            Dialect::Unrecognized
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Semicolon => write!(f, "semicolon"),
            Dialect::Comma => write!(f, "comma"),
            Dialect::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Position of a line in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Body,
}

impl RowKind {
    /// Row 0 is the header, everything else is body.
    pub fn from_index(index: usize) -> Self {
        if index == 0 { RowKind::Header } else { RowKind::Body }
    }
}

/// Split one line into typed cells.
///
/// Header and body rows are tokenized identically today; the kind is passed
/// so position-specific rules can be added without changing callers.
pub fn tokenize(line: &str, kind: RowKind) -> Vec<Cell> {
    match Dialect::detect(line) {
        Dialect::Semicolon => line.split(';').map(classify).collect(),
        Dialect::Comma => split_quoted(line)
            .iter()
            .map(|field| process_field(field, kind))
            .collect(),
        Dialect::Unrecognized => Vec::new(),
    }
}

/// Split on commas outside double quotes. Quote characters toggle the
/// quoted state and are dropped; an unterminated quote makes every later
/// comma on the line literal.
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

fn process_field(field: &str, _kind: RowKind) -> Cell {
    let trimmed = field.trim();
    let unquoted = trimmed
        .strip_prefix(QUOTE)
        .and_then(|s| s.strip_suffix(QUOTE))
        .unwrap_or(trimmed);
    classify(unquoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_detect_dialect() {
        assert_eq!(Dialect::detect("a;b"), Dialect::Semicolon);
        assert_eq!(Dialect::detect("a,b;c"), Dialect::Semicolon);
        assert_eq!(Dialect::detect("a,b"), Dialect::Comma);
        assert_eq!(Dialect::detect("abc"), Dialect::Unrecognized);
    }

    #[test]
    fn test_semicolon_split_with_decimal_commas() {
        let cells = tokenize("Rossi;3,50;12", RowKind::Body);
        assert_eq!(cells, vec![text("Rossi"), Cell::Number(3.5), text("12")]);
    }

    #[test]
    fn test_semicolon_keeps_quotes() {
        let cells = tokenize("\"a\";b", RowKind::Body);
        assert_eq!(cells, vec![text("\"a\""), text("b")]);
    }

    #[test]
    fn test_semicolon_trailing_delimiter() {
        let cells = tokenize("a;b;", RowKind::Header);
        assert_eq!(cells, vec![text("a"), text("b"), text("")]);
    }

    #[test]
    fn test_comma_quoted_field_keeps_comma() {
        let cells = tokenize("\"Smith, J.\",3,14", RowKind::Body);
        assert_eq!(cells, vec![text("Smith, J."), text("3"), text("14")]);
    }

    #[test]
    fn test_comma_quoted_decimal() {
        let cells = tokenize("x,\"3,14\"", RowKind::Body);
        assert_eq!(cells, vec![text("x"), Cell::Number(3.14)]);
    }

    #[test]
    fn test_comma_trims_fields() {
        let cells = tokenize(" a , b ,c", RowKind::Body);
        assert_eq!(cells, vec![text("a"), text("b"), text("c")]);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        let cells = tokenize("a,\"b,c,d", RowKind::Body);
        assert_eq!(cells, vec![text("a"), text("b,c,d")]);
    }

    #[test]
    fn test_no_delimiter_yields_nothing() {
        assert!(tokenize("just text", RowKind::Header).is_empty());
        assert!(tokenize("3.14", RowKind::Body).is_empty());
    }

    #[test]
    fn test_header_and_body_tokenize_alike() {
        let line = "Name,1.5,\"x, y\"";
        assert_eq!(tokenize(line, RowKind::Header), tokenize(line, RowKind::Body));
    }

    #[test]
    fn test_row_kind_from_index() {
        assert_eq!(RowKind::from_index(0), RowKind::Header);
        assert_eq!(RowKind::from_index(3), RowKind::Body);
    }
}
