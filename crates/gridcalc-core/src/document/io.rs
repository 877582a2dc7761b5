use std::path::Path;

use super::Sheet;
use crate::error::{Result, SheetError};
use crate::storage::{SheetRecord, parse_sheet, write_sheet};
use gridcalc_engine::engine::CellRef;

impl Sheet {
    /// Every cell that differs from an empty default cell, row-major.
    pub fn records(&self) -> Vec<SheetRecord> {
        let default_color = self.default_color();
        self.cells
            .iter()
            .filter(|cell| !cell.is_default(default_color))
            .map(|cell| SheetRecord {
                name: cell.cell_ref().to_string(),
                text: (!cell.text.is_empty()).then(|| cell.text.clone()),
                bg_color: (cell.bg_color != default_color).then_some(cell.bg_color),
            })
            .collect()
    }

    /// Replace the sheet's contents with `records`.
    ///
    /// All names are validated before anything changes. Texts are replayed in
    /// order, so formulas see the cells loaded before them and are fixed up by
    /// propagation as later cells arrive. History is cleared by the reset.
    pub fn load_records(&mut self, records: Vec<SheetRecord>) -> Result<()> {
        let mut resolved = Vec::with_capacity(records.len());
        for record in records {
            let cell = CellRef::from_str(&record.name).ok_or_else(|| {
                SheetError::malformed(format!("Invalid cell name: {}", record.name))
            })?;
            if !cell.is_within(self.rows(), self.cols()) {
                return Err(SheetError::malformed(format!(
                    "Cell {} is outside the {}x{} grid",
                    record.name,
                    self.rows(),
                    self.cols()
                )));
            }
            resolved.push((cell, record));
        }

        if self.cells().any(|c| !c.is_default(self.default_color())) {
            tracing::warn!("loading records over a non-empty sheet; clearing it first");
        }
        self.clear();

        for (cell, record) in resolved {
            if let Some(color) = record.bg_color {
                self.set_cell_color(&[cell], color)?;
            }
            if let Some(text) = record.text {
                self.set_cell_text(cell, &text)?;
            }
        }

        tracing::debug!(cells = self.records().len(), "records loaded");
        Ok(())
    }

    /// Load a .gcs file, replacing the sheet's contents.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let records = parse_sheet(path)?;
        self.load_records(records)
    }

    /// Save the sheet to a .gcs file.
    pub fn save_file(&self, path: &Path) -> Result<()> {
        write_sheet(path, &self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Color;
    use pretty_assertions::assert_eq;

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_records_skip_default_cells() {
        let mut sheet = Sheet::new(5, 5).unwrap();
        sheet.set_cell_text(cell("B2"), "=A1").unwrap();
        sheet.set_cell_text(cell("A1"), "8").unwrap();
        sheet.set_cell_color(&[cell("C3")], Color(0xFFFF_0000)).unwrap();

        assert_eq!(
            sheet.records(),
            vec![
                SheetRecord::new("A1").with_text("8"),
                SheetRecord::new("B2").with_text("=A1"),
                SheetRecord::new("C3").with_bg_color(Color(0xFFFF_0000)),
            ]
        );
    }

    #[test]
    fn test_load_records_replays_formulas_in_any_order() {
        let mut sheet = Sheet::new(5, 5).unwrap();
        sheet
            .load_records(vec![
                SheetRecord::new("B2").with_text("=A1*2"),
                SheetRecord::new("A1").with_text("8"),
            ])
            .unwrap();
        assert_eq!(sheet.cell(cell("B2")).unwrap().value(), "16");
        assert!(!sheet.can_undo());
    }

    #[test]
    fn test_load_records_rejects_bad_names_without_changes() {
        let mut sheet = Sheet::new(5, 5).unwrap();
        sheet.set_cell_text(cell("A1"), "keep").unwrap();

        let err = sheet
            .load_records(vec![
                SheetRecord::new("A2").with_text("1"),
                SheetRecord::new("nope").with_text("2"),
            ])
            .unwrap_err();
        assert!(matches!(err, SheetError::MalformedPersistedData { .. }));

        let err = sheet
            .load_records(vec![SheetRecord::new("Z99").with_text("2")])
            .unwrap_err();
        assert!(matches!(err, SheetError::MalformedPersistedData { .. }));

        assert_eq!(sheet.cell(cell("A1")).unwrap().text(), "keep");
        assert_eq!(sheet.cell(cell("A2")).unwrap().text(), "");
    }

    #[test]
    fn test_save_then_load_reproduces_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budget.gcs");

        let mut sheet = Sheet::new(10, 10).unwrap();
        sheet.set_cell_text(cell("A1"), "rent \"flat\"").unwrap();
        sheet.set_cell_text(cell("B1"), "1200").unwrap();
        sheet.set_cell_text(cell("B2"), "=B1*12").unwrap();
        sheet
            .set_cell_color(&[cell("B2"), cell("C5")], Color(0xFF00_FF00))
            .unwrap();
        sheet.save_file(&path).unwrap();

        let mut loaded = Sheet::new(10, 10).unwrap();
        loaded.load_file(&path).unwrap();
        assert_eq!(loaded.records(), sheet.records());
        assert_eq!(loaded.cell(cell("B2")).unwrap().value(), "14400");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = Sheet::new(5, 5).unwrap();
        let err = sheet.load_file(&dir.path().join("missing.gcs")).unwrap_err();
        assert!(matches!(err, SheetError::Io(_)));
    }
}
