//! gridcalc-core - UI-agnostic sheet model + storage.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::{MAX_CELLS, SheetConfig};
pub use document::{
    Cell, CellError, CellProperty, CellState, Color, Command, HistoryDirection, HistoryState,
    Sheet, SheetEvent,
};
pub use error::{Result, SheetError};
pub use storage::SheetRecord;

pub use gridcalc_engine::engine::CellRef;
