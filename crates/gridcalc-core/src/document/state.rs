use std::collections::HashMap;

use super::cell::{Cell, Color};
use super::events::{CellProperty, SheetEvent};
use super::history::History;
use crate::config::SheetConfig;
use crate::error::{Result, SheetError};
use gridcalc_engine::engine::{CellRef, DependencyGraph};

/// UI-agnostic state for one spreadsheet.
pub struct Sheet {
    /// Dimensions and defaults the sheet was created with
    pub(crate) config: SheetConfig,
    /// Row-major cell storage; fixed size for the sheet's lifetime
    pub(crate) cells: Vec<Cell>,
    /// Formula cell -> referenced cells, plus the transpose
    pub(crate) graph: DependencyGraph,
    /// Formula cells in a structural error state -> cells they name.
    /// These are retried when one of the named cells changes value.
    pub(crate) parked: HashMap<CellRef, Vec<CellRef>>,
    /// Undo/redo stacks
    pub(crate) history: History,
    /// Pending change notifications
    pub(crate) events: Vec<SheetEvent>,
}

impl Sheet {
    /// Create a sheet with `rows` x `cols` empty cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_config(SheetConfig {
            rows,
            cols,
            ..SheetConfig::default()
        })
    }

    /// Create a sheet from `config`; fails with `InvalidSize` for an empty
    /// or oversized grid.
    pub fn with_config(config: SheetConfig) -> Result<Self> {
        config.validate()?;
        let mut cells = Vec::with_capacity(config.rows * config.cols);
        for row in 0..config.rows {
            for col in 0..config.cols {
                cells.push(Cell::new(row, col, config.default_color));
            }
        }

        Ok(Sheet {
            history: History::new(config.history_limit),
            config,
            cells,
            graph: DependencyGraph::new(),
            parked: HashMap::new(),
            events: Vec::new(),
        })
    }

    pub fn rows(&self) -> usize {
        self.config.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn default_color(&self) -> Color {
        self.config.default_color
    }

    pub(crate) fn index_of(&self, cell: CellRef) -> Result<usize> {
        if cell.is_within(self.config.rows, self.config.cols) {
            Ok(cell.row * self.config.cols + cell.col)
        } else {
            Err(SheetError::OutOfRange {
                cell,
                rows: self.config.rows,
                cols: self.config.cols,
            })
        }
    }

    pub fn cell(&self, cell: CellRef) -> Result<&Cell> {
        let idx = self.index_of(cell)?;
        Ok(&self.cells[idx])
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell> {
        self.cell(CellRef::new(col, row))
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells the formula in `cell` currently reads from.
    pub fn dependencies_of(&self, cell: CellRef) -> Vec<CellRef> {
        self.graph.precedents(&cell).collect()
    }

    /// Cells whose formulas currently read from `cell`.
    pub fn dependents_of(&self, cell: CellRef) -> Vec<CellRef> {
        self.graph.dependents(&cell).collect()
    }

    /// Drain queued change notifications.
    pub fn take_events(&mut self) -> Vec<SheetEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn notify(&mut self, cell: CellRef, property: CellProperty) {
        self.events.push(SheetEvent::CellChanged { cell, property });
    }
}
