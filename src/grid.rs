use crate::error::{GameError, Result};
use crate::snake::Direction;
use crate::{Coords, TermInt};

/// Link from a snake segment to the next one toward the tail. `None` marks the tail.
pub type Trail = Option<Direction>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Head(Trail),
    Body(Trail),
    Food,
}

impl Cell {
    pub fn is_snake(&self) -> bool {
        matches!(self, Cell::Head(_) | Cell::Body(_))
    }

    pub fn trail(&self) -> Trail {
        match self {
            Cell::Head(trail) | Cell::Body(trail) => *trail,
            _ => None,
        }
    }

    /// Same segment kind, pointing somewhere else.
    pub fn with_trail(self, trail: Trail) -> Self {
        match self {
            Cell::Head(_) => Cell::Head(trail),
            Cell::Body(_) => Cell::Body(trail),
            other => other,
        }
    }
}

/// The play field, `rows x cols` cells stored row-major.
///
/// The outer two rows and the outer column on each side are reserved for the
/// status line and the border. Only the interior is ever written by the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: TermInt,
    cols: TermInt,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: TermInt, cols: TermInt) -> Result<Self> {
        let len = rows as usize * cols as usize;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GameError::Allocation { rows, cols })?;
        cells.resize(len, Cell::Empty);

        Ok(Grid { rows, cols, cells })
    }

    pub fn dimensions(&self) -> (TermInt, TermInt) {
        (self.rows, self.cols)
    }

    /// Panics on coordinates outside the grid; callers validate first.
    pub fn get(&self, row: TermInt, col: TermInt) -> Cell {
        self.cells[self.idx(row, col)]
    }

    pub fn set(&mut self, row: TermInt, col: TermInt, cell: Cell) {
        let i = self.idx(row, col);
        self.cells[i] = cell;
    }

    pub fn at(&self, pos: Coords) -> Cell {
        self.get(pos.0, pos.1)
    }

    pub fn put(&mut self, pos: Coords, cell: Cell) {
        self.set(pos.0, pos.1, cell)
    }

    pub fn contains(&self, (row, col): Coords) -> bool {
        row < self.rows && col < self.cols
    }

    /// Whether `pos` lies in the playable area: rows `[2, rows-3]`, columns `[1, cols-2]`.
    pub fn is_interior(&self, (row, col): Coords) -> bool {
        row >= 2 && row + 3 <= self.rows && col >= 1 && col + 2 <= self.cols
    }

    pub fn interior_size(&self) -> usize {
        self.rows.saturating_sub(4) as usize * self.cols.saturating_sub(2) as usize
    }

    #[cfg(test)]
    pub fn count(&self, pred: impl Fn(&Cell) -> bool) -> usize {
        self.cells.iter().filter(|c| pred(*c)).count()
    }

    fn idx(&self, row: TermInt, col: TermInt) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        row as usize * self.cols as usize + col as usize
    }
}
