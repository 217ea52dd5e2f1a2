//! The machine's memory: a row of byte cells that grows in both directions.

use std::collections::VecDeque;

/// Growable memory tape with a single data pointer.
///
/// Starts as one zero cell. Moving past either end adds exactly one zero cell
/// on that side, so the pointer always refers to an existing cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: VecDeque<u8>,
    pointer: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: VecDeque::from([0]),
            pointer: 0,
        }
    }

    /// `>`: step right, appending a cell when leaving the end.
    pub fn move_right(&mut self) {
        self.pointer += 1;
        if self.pointer == self.cells.len() {
            self.cells.push_back(0);
        }
    }

    /// `<`: step left. From index 0 a new cell is prepended and becomes index 0,
    /// shifting every existing cell one position up.
    pub fn move_left(&mut self) {
        if self.pointer == 0 {
            self.cells.push_front(0);
        } else {
            self.pointer -= 1;
        }
    }

    pub fn get(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn set(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.pointer];
        *cell = cell.wrapping_sub(1);
    }

    /// Index of the active cell.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; the tape never shrinks below its seed cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Copy of all cells, leftmost first.
    pub fn cells(&self) -> Vec<u8> {
        self.cells.iter().copied().collect()
    }
}
