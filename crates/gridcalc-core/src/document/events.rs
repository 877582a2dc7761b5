//! Change notifications for the host.
//!
//! The sheet queues events while a mutation runs; the host drains them with
//! [`crate::Sheet::take_events`] after the call returns.

use gridcalc_engine::engine::CellRef;

/// Which cell property changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellProperty {
    Text,
    Value,
    BgColor,
}

/// Undo/redo availability after a history operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
    /// Message of the command an undo would revert
    pub undo_message: Option<&'static str>,
    /// Message of the command a redo would reapply
    pub redo_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetEvent {
    CellChanged { cell: CellRef, property: CellProperty },
    HistoryChanged(HistoryState),
}
