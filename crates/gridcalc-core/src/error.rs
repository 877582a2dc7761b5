//! Error types for gridcalc core.

use thiserror::Error;

use crate::document::HistoryDirection;
use gridcalc_engine::engine::CellRef;

/// Errors surfaced to the host of a sheet.
///
/// Formula problems never show up here: they are converted into cell values
/// (see [`crate::document::CellError`]).
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cell {cell} is outside the {rows}x{cols} grid")]
    OutOfRange { cell: CellRef, rows: usize, cols: usize },

    #[error("Nothing to {0}")]
    EmptyHistory(HistoryDirection),

    #[error("Malformed sheet data: {message}")]
    MalformedPersistedData { message: String },

    #[error("Invalid grid size {rows}x{cols}: a sheet holds between 1 and {max} cells")]
    InvalidSize { rows: usize, cols: usize, max: usize },

    #[error("Expected {expected} colors, got {actual}")]
    ColorCountMismatch { expected: usize, actual: usize },
}

impl SheetError {
    pub(crate) fn malformed(message: impl Into<String>) -> SheetError {
        SheetError::MalformedPersistedData {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
