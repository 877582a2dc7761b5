//! File format support for sheets.
//!
//! A sheet is persisted as a list of [`SheetRecord`]s, one per cell that
//! differs from an empty default cell. The `.gcs` text format stores one
//! record per line.

mod parser;
mod writer;

use serde::{Deserialize, Serialize};

use crate::document::Color;

pub use parser::{parse_sheet, parse_sheet_content};
pub use writer::{write_sheet, write_sheet_content};

/// Persisted state of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRecord {
    /// Cell name, e.g. `B2`
    pub name: String,
    /// Raw text, when not empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Background color, when not the sheet default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<Color>,
}

impl SheetRecord {
    pub fn new(name: impl Into<String>) -> Self {
        SheetRecord {
            name: name.into(),
            text: None,
            bg_color: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_bg_color(mut self, color: Color) -> Self {
        self.bg_color = Some(color);
        self
    }
}
