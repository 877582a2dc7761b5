//! Parser for the .gcs file format

use std::fs;
use std::path::Path;

use super::SheetRecord;
use crate::document::Color;
use crate::error::{Result, SheetError};
use gridcalc_engine::engine::CellRef;

/// Parse a .gcs file into records
pub fn parse_sheet(path: &Path) -> Result<Vec<SheetRecord>> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content)
}

/// Parse .gcs content from a string
pub fn parse_sheet_content(content: &str) -> Result<Vec<SheetRecord>> {
    let mut records = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse "NAME: "TEXT" bg=COLOR" format
        let Some((name, rest)) = line.split_once(':') else {
            return Err(parse_error(line_num, "Expected 'CELL: \"TEXT\" bg=COLOR' format"));
        };

        let name = name.trim();
        if CellRef::from_str(name).is_none() {
            return Err(parse_error(line_num, format!("Invalid cell reference: {}", name)));
        }

        let mut record = SheetRecord::new(name.to_ascii_uppercase());
        let mut rest = rest.trim();

        if rest.starts_with('"') {
            let (text, remainder) = split_quoted(rest)
                .ok_or_else(|| parse_error(line_num, "Unterminated quoted text"))?;
            record.text = Some(unescape_text(text));
            rest = remainder.trim();
        }

        if let Some(hex) = rest.strip_prefix("bg=") {
            let color = hex
                .trim()
                .parse::<Color>()
                .map_err(|e| parse_error(line_num, e))?;
            record.bg_color = Some(color);
        } else if !rest.is_empty() {
            return Err(parse_error(
                line_num,
                format!("Invalid value: {}. Use quotes for text.", rest),
            ));
        }

        if record.text.is_none() && record.bg_color.is_none() {
            return Err(parse_error(line_num, "Expected quoted text or bg=COLOR"));
        }
        records.push(record);
    }

    Ok(records)
}

fn parse_error(line: usize, message: impl std::fmt::Display) -> SheetError {
    SheetError::malformed(format!("line {}: {}", line, message))
}

/// Split `"..."rest` at the closing quote, honouring backslash escapes.
fn split_quoted(input: &str) -> Option<(&str, &str)> {
    let body = input.strip_prefix('"')?;
    let mut escaped = false;
    for (idx, ch) in body.char_indices() {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some((&body[..idx], &body[idx + 1..])),
            _ => {}
        }
    }
    None
}

fn unescape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                match next {
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    'n' => out.push('\n'),
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            } else {
                out.push('\\');
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_text() {
        let records = parse_sheet_content(r#"A1: "8""#).unwrap();
        assert_eq!(records, vec![SheetRecord::new("A1").with_text("8")]);
    }

    #[test]
    fn test_parse_formula_with_color() {
        let records = parse_sheet_content(r#"B2: "=A1 + 1" bg=FF00FF00"#).unwrap();
        assert_eq!(
            records,
            vec![
                SheetRecord::new("B2")
                    .with_text("=A1 + 1")
                    .with_bg_color(Color(0xFF00_FF00))
            ]
        );
    }

    #[test]
    fn test_parse_color_only() {
        let records = parse_sheet_content("c3: bg=FFFF0000").unwrap();
        assert_eq!(
            records,
            vec![SheetRecord::new("C3").with_bg_color(Color(0xFFFF_0000))]
        );
    }

    #[test]
    fn test_parse_escapes() {
        let content = r#"A1: "He said \"hi\"\nC:\\tmp""#;
        let records = parse_sheet_content(content).unwrap();
        assert_eq!(records[0].text.as_deref(), Some("He said \"hi\"\nC:\\tmp"));
    }

    #[test]
    fn test_skip_comments_and_empty_lines() {
        let content = r#"
# This is a comment
A1: "42"

# Another comment

B1: "100"
"#;
        let records = parse_sheet_content(content).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_sheet_content("A1: \"1\"\n\nnot a cell line").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);

        let err = parse_sheet_content("A1: 42").unwrap_err();
        assert!(err.to_string().contains("Use quotes for text"));

        let err = parse_sheet_content("A1: \"open").unwrap_err();
        assert!(err.to_string().contains("Unterminated"));

        let err = parse_sheet_content("A1: bg=purple").unwrap_err();
        assert!(err.to_string().contains("line 1"));

        let err = parse_sheet_content("1A: \"x\"").unwrap_err();
        assert!(err.to_string().contains("Invalid cell reference"));
    }
}
