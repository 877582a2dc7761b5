//! Reversible edits and the undo/redo stacks.

use std::fmt;

use super::Sheet;
use super::cell::Color;
use super::events::{HistoryState, SheetEvent};
use crate::error::{Result, SheetError};
use gridcalc_engine::engine::CellRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryDirection::Undo => write!(f, "undo"),
            HistoryDirection::Redo => write!(f, "redo"),
        }
    }
}

/// A reversible sheet edit. Each command records the prior state it needs
/// to undo itself when it is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ChangeText {
        cell: CellRef,
        old_text: String,
        new_text: String,
    },
    ChangeColor {
        cells: Vec<CellRef>,
        old_colors: Vec<Color>,
        new_color: Color,
    },
}

impl Command {
    /// Capture `cell`'s current text and pair it with `text`.
    pub fn change_text(sheet: &Sheet, cell: CellRef, text: &str) -> Result<Command> {
        let old_text = sheet.cell(cell)?.text().to_string();
        Ok(Command::ChangeText {
            cell,
            old_text,
            new_text: text.to_string(),
        })
    }

    /// Capture the current colors of `cells` and pair them with `color`.
    pub fn change_color(sheet: &Sheet, cells: Vec<CellRef>, color: Color) -> Result<Command> {
        let old_colors = cells
            .iter()
            .map(|cell| sheet.cell(*cell).map(|c| c.bg_color()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Command::ChangeColor {
            cells,
            old_colors,
            new_color: color,
        })
    }

    pub fn message(&self) -> &'static str {
        match self {
            Command::ChangeText { .. } => "changed cell text",
            Command::ChangeColor { .. } => "changed cell background color",
        }
    }

    pub fn execute(&self, sheet: &mut Sheet) -> Result<()> {
        match self {
            Command::ChangeText { cell, new_text, .. } => sheet.set_cell_text(*cell, new_text),
            Command::ChangeColor { cells, new_color, .. } => sheet.set_cell_color(cells, *new_color),
        }
    }

    pub fn unexecute(&self, sheet: &mut Sheet) -> Result<()> {
        match self {
            Command::ChangeText { cell, old_text, .. } => sheet.set_cell_text(*cell, old_text),
            Command::ChangeColor {
                cells, old_colors, ..
            } => sheet.set_cell_colors(cells, old_colors),
        }
    }
}

/// Bounded undo stack plus redo stack. The oldest entry is dropped once
/// the undo stack exceeds its limit.
#[derive(Debug, Clone)]
pub(crate) struct History {
    undo: Vec<Command>,
    redo: Vec<Command>,
    limit: usize,
}

impl History {
    pub(crate) fn new(limit: usize) -> Self {
        History {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    fn push_undo(&mut self, command: Command) {
        self.undo.push(command);
        if self.undo.len() > self.limit {
            let excess = self.undo.len() - self.limit;
            self.undo.drain(..excess);
        }
    }

    pub(crate) fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: !self.undo.is_empty(),
            can_redo: !self.redo.is_empty(),
            undo_message: self.undo.last().map(Command::message),
            redo_message: self.redo.last().map(Command::message),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Sheet {
    /// Run `command` and record it for undo. A new command discards the
    /// redo stack.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        command.execute(self)?;
        tracing::debug!(message = command.message(), "command executed");
        self.history.redo.clear();
        self.history.push_undo(command);
        self.notify_history();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<()> {
        let command = self
            .history
            .undo
            .pop()
            .ok_or(SheetError::EmptyHistory(HistoryDirection::Undo))?;
        if let Err(e) = command.unexecute(self) {
            self.history.undo.push(command);
            return Err(e);
        }
        self.history.redo.push(command);
        self.notify_history();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        let command = self
            .history
            .redo
            .pop()
            .ok_or(SheetError::EmptyHistory(HistoryDirection::Redo))?;
        if let Err(e) = command.execute(self) {
            self.history.redo.push(command);
            return Err(e);
        }
        self.history.push_undo(command);
        self.notify_history();
        Ok(())
    }

    /// Edit a cell's text through the history.
    pub fn edit_cell_text(&mut self, cell: CellRef, text: &str) -> Result<()> {
        let command = Command::change_text(self, cell, text)?;
        self.execute(command)
    }

    /// Recolor cells through the history.
    pub fn edit_cell_color(&mut self, cells: Vec<CellRef>, color: Color) -> Result<()> {
        let command = Command::change_color(self, cells, color)?;
        self.execute(command)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.history.redo.is_empty()
    }

    pub fn undo_message(&self) -> Option<&'static str> {
        self.history.undo.last().map(Command::message)
    }

    pub fn redo_message(&self) -> Option<&'static str> {
        self.history.redo.last().map(Command::message)
    }

    pub(crate) fn notify_history(&mut self) {
        let state = self.history.state();
        self.events.push(SheetEvent::HistoryChanged(state));
    }
}
