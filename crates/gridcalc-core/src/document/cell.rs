//! Cell data structures for the sheet grid.
//!
//! - [`Cell`] - Raw text, displayed value, background color and evaluation state
//! - [`CellState`] - Where a cell is in the formula state machine
//! - [`CellError`] - Formula failures, displayed in place of a value
//! - [`Color`] - ARGB background color

use std::fmt;
use std::str::FromStr;

use gridcalc_engine::ExprError;
use gridcalc_engine::engine::CellRef;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 32-bit ARGB color, written as eight hex digits (`FF00FF00`).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts `AARRGGBB` or `RRGGBB` (opaque), with an optional leading `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let valid = hex.chars().all(|c| c.is_ascii_hexdigit());
        match (hex.len(), valid) {
            (8, true) => u32::from_str_radix(hex, 16)
                .map(Color)
                .map_err(|e| format!("Invalid color {}: {}", s, e)),
            (6, true) => u32::from_str_radix(hex, 16)
                .map(|rgb| Color(0xFF00_0000 | rgb))
                .map_err(|e| format!("Invalid color {}: {}", s, e)),
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

/// Formula failures. The display string is what the cell shows.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    #[error("!(invalid expression)")]
    MalformedExpression,
    #[error("!(Bad reference)")]
    BadReference,
    #[error("!(self reference)")]
    SelfReference,
    #[error("!(circular reference)")]
    CircularReference,
    #[error("!(division by zero)")]
    DivisionByZero,
}

impl From<ExprError> for CellError {
    fn from(err: ExprError) -> Self {
        match err {
            ExprError::MalformedExpression(_) => CellError::MalformedExpression,
            ExprError::DivisionByZero => CellError::DivisionByZero,
            ExprError::UnboundVariable(_) => CellError::BadReference,
        }
    }
}

/// Evaluation state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Text does not start with `=`
    Literal,
    /// Formula is being evaluated
    Evaluating,
    /// Formula evaluated successfully
    Valid,
    /// Formula failed; the value shows the error
    Error(CellError),
}

/// A cell in the sheet grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    row: usize,
    col: usize,
    pub(crate) text: String,
    pub(crate) value: String,
    pub(crate) bg_color: Color,
    pub(crate) state: CellState,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize, bg_color: Color) -> Cell {
        Cell {
            row,
            col,
            text: String::new(),
            value: String::new(),
            bg_color,
            state: CellState::Literal,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn cell_ref(&self) -> CellRef {
        CellRef::new(self.col, self.row)
    }

    /// Text as entered, including a leading `=` for formulas.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Displayed value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn bg_color(&self) -> Color {
        self.bg_color
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, CellState::Error(_))
    }

    /// Value as a formula operand: numeric text parses, anything else is 0.
    pub fn numeric_value(&self) -> f64 {
        if self.is_error() {
            return 0.0;
        }
        self.value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0)
    }

    /// Whether the cell holds nothing worth persisting.
    pub fn is_default(&self, default_color: Color) -> bool {
        self.text.is_empty() && self.bg_color == default_color
    }

    pub(crate) fn reset(&mut self, bg_color: Color) {
        self.text.clear();
        self.value.clear();
        self.bg_color = bg_color;
        self.state = CellState::Literal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        assert_eq!("FF00FF00".parse::<Color>(), Ok(Color(0xFF00_FF00)));
        assert_eq!("#ff0000".parse::<Color>(), Ok(Color(0xFFFF_0000)));
        assert_eq!(Color(0x80AB_CDEF).to_string(), "80ABCDEF");
        assert!("red".parse::<Color>().is_err());
        assert!("FFFFF".parse::<Color>().is_err());
        assert!("+FFFFFFF".parse::<Color>().is_err());
    }

    #[test]
    fn test_error_display_strings() {
        assert_eq!(CellError::BadReference.to_string(), "!(Bad reference)");
        assert_eq!(CellError::SelfReference.to_string(), "!(self reference)");
        assert_eq!(CellError::CircularReference.to_string(), "!(circular reference)");
    }

    #[test]
    fn test_numeric_value() {
        let mut cell = Cell::new(0, 0, Color::WHITE);
        assert_eq!(cell.numeric_value(), 0.0);
        cell.value = "12.5".into();
        assert_eq!(cell.numeric_value(), 12.5);
        cell.value = "hello".into();
        assert_eq!(cell.numeric_value(), 0.0);
        cell.value = "7".into();
        cell.state = CellState::Error(CellError::DivisionByZero);
        assert_eq!(cell.numeric_value(), 0.0);
    }
}
