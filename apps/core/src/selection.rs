use serde::{Deserialize, Serialize};

use crate::model::IndexEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

/// Highlighted row within the current result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    index: usize,
}

impl SelectionState {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn step(&mut self, direction: Direction, len: usize) {
        self.index = next_selection_index(self.index, len, direction);
    }

    pub fn clamp(&mut self, len: usize) {
        self.index = if len == 0 { 0 } else { self.index.min(len - 1) };
    }

    pub fn select(&mut self, row: usize, len: usize) -> bool {
        if row >= len {
            return false;
        }
        self.index = row;
        true
    }

    pub fn pick<'a>(&self, results: &'a [IndexEntry]) -> Option<&'a IndexEntry> {
        results.get(self.index)
    }
}

/// Clamps at both ends; never wraps.
pub fn next_selection_index(current: usize, len: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }

    let max = len - 1;
    match direction {
        Direction::Up => current.min(max).saturating_sub(1),
        Direction::Down => (current + 1).min(max),
    }
}
