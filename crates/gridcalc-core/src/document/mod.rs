//! Sheet state and logic (UI-agnostic).

mod cell;
mod events;
mod history;
mod io;
mod ops;
mod state;

pub use cell::{Cell, CellError, CellState, Color};
pub use events::{CellProperty, HistoryState, SheetEvent};
pub use history::{Command, HistoryDirection};
pub use state::Sheet;
