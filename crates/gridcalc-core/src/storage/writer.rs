//! Writer for the .gcs file format

use std::fs;
use std::path::Path;

use super::SheetRecord;
use crate::error::Result;

/// Write records to a .gcs file
pub fn write_sheet(path: &Path, records: &[SheetRecord]) -> Result<()> {
    let content = write_sheet_content(records);
    fs::write(path, content)?;
    Ok(())
}

/// Write records to a .gcs format string, in the order given
pub fn write_sheet_content(records: &[SheetRecord]) -> String {
    let mut lines = vec!["# gridcalc sheet".to_string()];

    for record in records {
        if record.text.is_none() && record.bg_color.is_none() {
            continue;
        }

        let mut line = format!("{}:", record.name);
        if let Some(text) = &record.text {
            line.push_str(&format!(" \"{}\"", escape_text(text)));
        }
        if let Some(color) = record.bg_color {
            line.push_str(&format!(" bg={}", color));
        }
        lines.push(line);
    }

    lines.join("\n") + "\n"
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}
