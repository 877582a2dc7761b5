use std::collections::HashSet;

use super::Sheet;
use super::cell::{CellError, CellState, Color};
use super::events::CellProperty;
use crate::error::{Result, SheetError};
use gridcalc_engine::engine::{
    CellRef, ExprNode, detect_cycle, evaluate, format_number, parse_expression, variable_names,
};

/// A formula that passed every structural check and may be committed.
struct CheckedFormula {
    tree: ExprNode,
    references: Vec<CellRef>,
}

/// A structural failure plus the cells worth watching for a retry.
struct Rejected {
    error: CellError,
    watch: Vec<CellRef>,
}

impl Rejected {
    fn new(error: CellError, watch: Vec<CellRef>) -> Self {
        Rejected { error, watch }
    }
}

impl Sheet {
    /// Set the raw text of a cell and recalculate everything downstream.
    ///
    /// Formula failures never surface here; they become the cell's value.
    pub fn set_cell_text(&mut self, cell: CellRef, text: &str) -> Result<()> {
        let idx = self.index_of(cell)?;
        if self.cells[idx].text == text {
            return Ok(());
        }

        self.cells[idx].text = text.to_string();
        self.notify(cell, CellProperty::Text);
        self.recalculate(cell);
        self.retry_circular(cell);
        Ok(())
    }

    /// Set one background color on several cells.
    pub fn set_cell_color(&mut self, cells: &[CellRef], color: Color) -> Result<()> {
        let indices = self.indices_of(cells)?;
        for (cell, idx) in cells.iter().zip(indices) {
            self.apply_color(*cell, idx, color);
        }
        Ok(())
    }

    /// Set background colors pairwise: `cells[i]` gets `colors[i]`.
    pub fn set_cell_colors(&mut self, cells: &[CellRef], colors: &[Color]) -> Result<()> {
        if cells.len() != colors.len() {
            return Err(SheetError::ColorCountMismatch {
                expected: cells.len(),
                actual: colors.len(),
            });
        }
        let indices = self.indices_of(cells)?;
        for ((cell, idx), color) in cells.iter().zip(indices).zip(colors) {
            self.apply_color(*cell, idx, *color);
        }
        Ok(())
    }

    /// Reset every cell to empty text and the default color, and forget
    /// all dependencies and history.
    pub fn clear(&mut self) {
        let default_color = self.default_color();
        for idx in 0..self.cells.len() {
            let cell = self.cells[idx].cell_ref();
            let before = self.cells[idx].clone();
            self.cells[idx].reset(default_color);
            if !before.text.is_empty() {
                self.notify(cell, CellProperty::Text);
            }
            if !before.value.is_empty() {
                self.notify(cell, CellProperty::Value);
            }
            if before.bg_color != default_color {
                self.notify(cell, CellProperty::BgColor);
            }
        }
        self.graph.clear();
        self.parked.clear();
        self.history.clear();
        self.notify_history();
        tracing::debug!("sheet cleared");
    }

    fn indices_of(&self, cells: &[CellRef]) -> Result<Vec<usize>> {
        cells.iter().map(|cell| self.index_of(*cell)).collect()
    }

    fn apply_color(&mut self, cell: CellRef, idx: usize, color: Color) {
        if self.cells[idx].bg_color != color {
            self.cells[idx].bg_color = color;
            self.notify(cell, CellProperty::BgColor);
        }
    }

    /// Re-run `cell` from its stored text and propagate a changed value.
    fn recalculate(&mut self, cell: CellRef) {
        let changed = self.evaluate_cell(cell);
        if changed && !self.cell_is_error(cell) {
            self.propagate(cell);
        }
    }

    /// Push a value change of `origin` to every cell downstream of it.
    ///
    /// Dependents are re-run in topological order, so each one is evaluated
    /// once, after all of its changed inputs. A dependent is only re-run when
    /// one of its inputs changed to a non-error value.
    fn propagate(&mut self, origin: CellRef) {
        let order = self.recalc_order(origin);
        let mut changed: HashSet<CellRef> = HashSet::from([origin]);

        for cell in order {
            let triggered = self.graph.precedents(&cell).any(|p| changed.contains(&p));
            if !triggered {
                continue;
            }
            if self.evaluate_cell(cell) && !self.cell_is_error(cell) {
                changed.insert(cell);
            }
        }

        // Parked formulas get their retry once the live graph has settled.
        let mut retry: Vec<CellRef> = self
            .parked
            .iter()
            .filter(|(_, watch)| watch.iter().any(|w| changed.contains(w)))
            .map(|(cell, _)| *cell)
            .collect();
        retry.sort();
        for cell in retry {
            if self.parked.contains_key(&cell) {
                tracing::debug!(cell = %cell, "retrying parked formula");
                self.recalculate(cell);
            }
        }
    }

    /// Re-check parked circular formulas after `edited` got new text.
    ///
    /// The edit may have dropped edges a cycle ran through without changing
    /// any value, so value-driven retries alone would miss it.
    fn retry_circular(&mut self, edited: CellRef) {
        let mut retry: Vec<CellRef> = self
            .parked
            .keys()
            .copied()
            .filter(|parked| *parked != edited)
            .filter(|parked| {
                self.cell(*parked)
                    .is_ok_and(|c| c.state() == CellState::Error(CellError::CircularReference))
            })
            .collect();
        retry.sort();
        for cell in retry {
            if self.parked.contains_key(&cell) {
                tracing::debug!(cell = %cell, "re-checking circular formula");
                self.recalculate(cell);
            }
        }
    }

    /// Cells downstream of `origin` in dependency order, excluding `origin`.
    fn recalc_order(&self, origin: CellRef) -> Vec<CellRef> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        self.topological_sort(origin, &mut result, &mut visited);
        result.pop();
        result.reverse();
        result
    }

    fn topological_sort(
        &self,
        cell: CellRef,
        result: &mut Vec<CellRef>,
        visited: &mut HashSet<CellRef>,
    ) {
        if !visited.insert(cell) {
            return;
        }
        for dependent in self.graph.dependents(&cell) {
            self.topological_sort(dependent, result, visited);
        }
        result.push(cell);
    }

    fn cell_is_error(&self, cell: CellRef) -> bool {
        self.cell(cell).map(|c| c.is_error()).unwrap_or(false)
    }

    /// Evaluate `cell` from its text. Returns whether its value changed.
    fn evaluate_cell(&mut self, cell: CellRef) -> bool {
        let Ok(idx) = self.index_of(cell) else {
            return false;
        };
        let text = self.cells[idx].text.clone();

        let (value, state) = match text.strip_prefix('=') {
            None => {
                self.graph.clear_precedents(cell);
                self.parked.remove(&cell);
                (text, CellState::Literal)
            }
            Some(formula) => match self.commit_formula(cell, formula) {
                Ok(n) => (format_number(n), CellState::Valid),
                Err(error) => (error.to_string(), CellState::Error(error)),
            },
        };

        self.cells[idx].state = state;
        if self.cells[idx].value == value {
            return false;
        }
        self.cells[idx].value = value;
        self.notify(cell, CellProperty::Value);
        true
    }

    /// Check, commit and evaluate a formula (text after `=`) for `cell`.
    fn commit_formula(&mut self, cell: CellRef, formula: &str) -> std::result::Result<f64, CellError> {
        let checked = match self.check_formula(cell, formula) {
            Ok(checked) => checked,
            Err(rejected) => {
                tracing::debug!(cell = %cell, error = %rejected.error, "formula rejected");
                self.graph.clear_precedents(cell);
                self.parked.insert(cell, rejected.watch);
                return Err(rejected.error);
            }
        };

        self.parked.remove(&cell);
        self.graph.set_precedents(cell, checked.references.iter().copied());
        if let Ok(idx) = self.index_of(cell) {
            self.cells[idx].state = CellState::Evaluating;
        }

        let bindings = |name: &str| {
            CellRef::from_str(name)
                .and_then(|r| self.cell(r).ok())
                .map(|c| c.numeric_value())
        };
        let result = evaluate(&checked.tree, &bindings).map_err(CellError::from);
        tracing::debug!(cell = %cell, formula, ?result, "formula evaluated");
        result
    }

    /// Structural checks on a candidate formula, run before any graph change.
    fn check_formula(&self, cell: CellRef, formula: &str) -> std::result::Result<CheckedFormula, Rejected> {
        let tree = parse_expression(formula)
            .map_err(|_| Rejected::new(CellError::MalformedExpression, Vec::new()))?;

        let mut references = Vec::new();
        let mut bad_reference = false;
        for name in variable_names(&tree) {
            match CellRef::from_str(&name) {
                Some(r) if r.is_within(self.rows(), self.cols()) => {
                    if !references.contains(&r) {
                        references.push(r);
                    }
                }
                _ => bad_reference = true,
            }
        }
        let others: Vec<CellRef> = references.iter().copied().filter(|r| *r != cell).collect();

        if bad_reference {
            return Err(Rejected::new(CellError::BadReference, others));
        }
        if others.len() != references.len() {
            return Err(Rejected::new(CellError::SelfReference, others));
        }
        if let Some(path) = detect_cycle(&cell, &references, &self.graph) {
            tracing::debug!(
                cell = %cell,
                path = %path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> "),
                "circular reference"
            );
            return Err(Rejected::new(CellError::CircularReference, references));
        }

        Ok(CheckedFormula { tree, references })
    }
}
