//! Cell values and the number-vs-text classifier.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

// A period followed by at least one digit, after decimal commas are normalized.
static DECIMAL_FRACTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[0-9]+").unwrap());

// Longest leading float literal: sign, mantissa, optional exponent.
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});

/// A single typed cell.
///
/// Serializes as a bare JSON number or string. Non-finite numbers have no
/// JSON form and are written as `null`, which reads back as NaN.
#[derive(Debug, Clone)]
pub enum Cell {
    /// Numeric value (decimal commas already normalized). NaN when the
    /// token looked fractional but had no parseable leading number.
    Number(f64),
    /// Text value, trimmed.
    Text(String),
}

impl Cell {
    /// An empty text cell, used for padding short rows.
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    /// Returns true if this cell is number-typed.
    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }

    /// Get the numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(_) => None,
        }
    }

    /// Get the text value, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Number(_) => None,
        }
    }

    /// Returns true for an empty text cell.
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }
}

// NaN cells compare equal so grids holding them can be compared.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Cell::Text(a), Cell::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => f.write_str(&format_number(*n)),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Cell::Number(_) => serializer.serialize_none(),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = Cell;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Cell, E> {
        Ok(Cell::Number(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Cell, E> {
        Ok(Cell::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Cell, E> {
        Ok(Cell::Number(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Cell, E> {
        Ok(Cell::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Cell, E> {
        Ok(Cell::Number(f64::NAN))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Cell, E> {
        Ok(Cell::Number(f64::NAN))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// Classify a raw token as a number or a string.
///
/// The token is trimmed and every comma is read as a decimal separator. Only
/// tokens with a fractional part (`.` followed by a digit) are numbers; plain
/// integers such as `"42"` stay text so identifiers keep their leading zeros.
/// Numbers are parsed from the longest valid leading float literal, so
/// `"1.5x"` becomes `1.5` and `"1.234.567"` becomes `1.234`. A fractional
/// token with no leading literal (`"v1.2"`) is a NaN number; one whose
/// literal overflows to infinity stays text.
///
/// # Example
///
/// ```
/// use csvsheet::{classify, Cell};
///
/// assert_eq!(classify(" 3,14 "), Cell::Number(3.14));
/// assert_eq!(classify("42"), Cell::Text("42".to_string()));
/// ```
pub fn classify(raw: &str) -> Cell {
    let trimmed = raw.trim();
    let candidate = trimmed.replace(',', ".");

    if DECIMAL_FRACTION.is_match(&candidate) {
        match parse_float_prefix(&candidate) {
            Some(value) if value.is_infinite() => {}
            Some(value) => return Cell::Number(value),
            None => return Cell::Number(f64::NAN),
        }
    }

    Cell::Text(trimmed.to_string())
}

/// Parse the longest leading float literal of `s`, ignoring any suffix.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let literal = FLOAT_PREFIX.find(s.trim_start())?;
    literal.as_str().parse::<f64>().ok()
}

/// Render a number in shortest round-trip form, switching to exponent
/// notation below 1e-6 and from 1e21 (`1e-7`, `1.5e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let s = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{}e{}{}", head, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", head, tail, e_sign, e.abs())
        }
    };

    format!("{}{}", sign, body)
}
