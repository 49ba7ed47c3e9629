use crate::error::{GameError, Result};
use crate::grid::{Cell, Grid};
use crate::Coords;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// The adjacent cell in this direction, if it doesn't underflow.
    pub fn offset(self, (row, col): Coords) -> Option<Coords> {
        match self {
            Up => row.checked_sub(1).map(|r| (r, col)),
            Down => row.checked_add(1).map(|r| (r, col)),
            Left => col.checked_sub(1).map(|c| (row, c)),
            Right => col.checked_add(1).map(|c| (row, c)),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Direction of the single step leading from `from` to `to`.
    pub fn between(from: Coords, to: Coords) -> Option<Self> {
        [Right, Down, Left, Up]
            .into_iter()
            .find(|dir| dir.offset(from) == Some(to))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_head: Coords, old_tail: Option<Coords> },
    Blocked
}

/// The snake as seen by the movement engine.
///
/// The body itself lives in the [`Grid`]: every segment cell stores the
/// direction of the next segment toward the tail, so only the head position
/// is kept here.
#[derive(Debug)]
pub struct Snake {
    head: Coords,
    length: usize,
    direction: Direction,
    grow_pending: bool,
}

impl Snake {
    /// Lays a straight snake on the grid with its head at `pos`, the body
    /// trailing behind it opposite to `direction`.
    pub fn new(grid: &mut Grid, pos: Coords, length: usize, direction: Direction) -> Result<Self> {
        let (rows, cols) = grid.dimensions();
        let behind = direction.opposite();

        let mut cell = Some(pos);
        for _ in 0..length {
            match cell {
                Some(c) if grid.is_interior(c) && grid.at(c) == Cell::Empty => cell = behind.offset(c),
                _ => return Err(GameError::TerminalTooSmall { rows, cols }),
            }
        }

        let mut cell = pos;
        for i in 0..length {
            let trail = if i + 1 < length { Some(behind) } else { None };
            let segment = if i == 0 { Cell::Head(trail) } else { Cell::Body(trail) };
            grid.put(cell, segment);
            if let Some(next) = behind.offset(cell) {
                cell = next;
            }
        }

        Ok(Snake { head: pos, length, direction, grow_pending: false })
    }

    pub fn head(&self) -> Coords {
        self.head
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    /// Reversing into the neck is accepted here; the step itself gets blocked.
    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    #[cfg(test)]
    pub fn is_growing(&self) -> bool {
        self.grow_pending
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }

    /// Where the head would go this tick, or `None` when the wall or the
    /// snake's own body is in the way.
    pub fn prospective_head(&self, grid: &Grid) -> Option<Coords> {
        self.direction
            .offset(self.head)
            .filter(|pos| grid.is_interior(*pos) && !grid.at(*pos).is_snake())
    }

    /// Shifts every segment one cell forward, the head moving into `next`.
    ///
    /// Walks from the head to the tail following the stored trails, writing
    /// each segment into the cell its predecessor just left. The former tail
    /// cell is cleared, or kept as the new tail when growth is pending.
    pub fn advance(&mut self, grid: &mut Grid, next: Coords) -> Result<MoveResult> {
        let old_head = self.head;
        let mut target = next;
        let mut current = self.head;

        for remaining in (0..self.length).rev() {
            let occupant = grid.at(current);
            if !occupant.is_snake() {
                return Err(broken(current, "expected a snake segment"));
            }
            let link = Direction::between(target, current)
                .ok_or_else(|| broken(current, "segment is not adjacent to its target"))?;

            if remaining == 0 {
                let old_tail = if self.grow_pending {
                    grid.put(target, occupant.with_trail(Some(link)));
                    grid.put(current, Cell::Body(None));
                    self.grow_pending = false;
                    self.length += 1;
                    None
                } else {
                    grid.put(target, occupant.with_trail(None));
                    grid.put(current, Cell::Empty);
                    Some(current)
                };

                self.head = next;
                return Ok(Moved { new_head: next, old_head, old_tail });
            }

            grid.put(target, occupant.with_trail(Some(link)));

            let following = occupant
                .trail()
                .and_then(|dir| dir.offset(current))
                .filter(|pos| grid.contains(*pos))
                .ok_or_else(|| broken(current, "trail ends before the tail"))?;

            target = current;
            current = following;
        }

        Err(broken(current, "snake has no segments"))
    }

    /// Segment positions from head to tail.
    #[cfg(test)]
    pub fn segments(&self, grid: &Grid) -> Vec<Coords> {
        let mut out = vec![self.head];
        let mut cell = self.head;
        while let Some(next) = grid.at(cell).trail().and_then(|dir| dir.offset(cell)) {
            out.push(next);
            cell = next;
        }
        out
    }
}

fn broken(pos: Coords, reason: &'static str) -> GameError {
    GameError::Inconsistent { row: pos.0, col: pos.1, reason }
}
