//! Selection-path rules: toggle, adjacency, and the derived word.
//!
//! The path is the ordered sequence of cells a session's players have traced
//! so far. Only the tip is retractable; everything behind it is pinned until
//! the path is submitted or reset.

use super::{Grid, Position};

/// Why a selection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    /// Cell is in the path but not at the tip; mid-path cells cannot be
    /// removed or re-selected out of order.
    AlreadySelected,
    /// Cell is more than one king move from the path's tip.
    NotAdjacent,
}

/// What an accepted selection did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    /// Cell appended to the tip.
    Appended,
    /// Tip cell popped off (toggle).
    DeselectedLast,
}

/// Ordered, append/pop-last-only path of selected cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedPath {
    cells: Vec<Position>,
}

impl SelectedPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one selection. Re-selecting the tip pops it; anything else must
    /// be a fresh cell adjacent to the tip. Rejections leave the path
    /// unchanged.
    pub fn select(&mut self, pos: Position) -> Result<SelectAction, SelectError> {
        if self.cells.last() == Some(&pos) {
            self.cells.pop();
            return Ok(SelectAction::DeselectedLast);
        }
        if self.cells.contains(&pos) {
            return Err(SelectError::AlreadySelected);
        }
        if let Some(last) = self.cells.last() {
            if !pos.is_adjacent_to(last) {
                return Err(SelectError::NotAdjacent);
            }
        }
        self.cells.push(pos);
        Ok(SelectAction::Appended)
    }

    /// Clear the path unconditionally.
    pub fn reset(&mut self) {
        self.cells.clear();
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Concatenation of grid letters along the path, recomputed on every call
    /// so the word can never drift from the path that spells it.
    pub fn word(&self, grid: &Grid) -> String {
        self.cells
            .iter()
            .filter_map(|&pos| grid.get(pos))
            .collect()
    }
}
