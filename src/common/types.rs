//! Common types used throughout delivery_robot

use std::fmt;

/// Grid cell addressed by (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Neighbor one step away in the direction of `action`
    pub fn step(&self, action: MoveAction) -> Cell {
        let (dr, dc) = action.delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    /// 4-connected neighbors, in `MoveAction::ALL` order
    pub fn neighbors(&self) -> [Cell; 4] {
        MoveAction::ALL.map(|a| self.step(a))
    }

    pub fn manhattan(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Single-cell move for the robot or a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Left,
    Down,
    Right,
    Up,
}

impl MoveAction {
    pub const ALL: [MoveAction; 4] = [
        MoveAction::Left,
        MoveAction::Down,
        MoveAction::Right,
        MoveAction::Up,
    ];

    /// (row, col) offset
    pub fn delta(&self) -> (i32, i32) {
        match self {
            MoveAction::Left => (0, -1),
            MoveAction::Down => (1, 0),
            MoveAction::Right => (0, 1),
            MoveAction::Up => (-1, 0),
        }
    }
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveAction::Left => "LEFT",
            MoveAction::Down => "DOWN",
            MoveAction::Right => "RIGHT",
            MoveAction::Up => "UP",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of a terminal check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Continue,
    Collision,
    Goal,
}

impl Terminal {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Terminal::Continue)
    }
}
