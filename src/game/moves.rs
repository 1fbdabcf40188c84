use serde::{Deserialize, Serialize};

/// Index of a node in the maze graph.
pub type NodeIndex = usize;

/// A discrete action: one of the four directions, or `Neutral` (no move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
    Neutral,
}

impl Move {
    /// The four directions, in enumeration order.
    pub const DIRECTIONS: [Move; 4] = [Move::Up, Move::Right, Move::Down, Move::Left];

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Right => Move::Left,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Neutral => Move::Neutral,
        }
    }

    /// Row/column offset of one step along this move.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Neutral => (0, 0),
        }
    }
}

/// The four ghosts. `Ghost::ALL` fixes the enumeration order used by every
/// "first found" rule in the controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Sue,
}

impl Ghost {
    pub const ALL: [Ghost; 4] = [Ghost::Blinky, Ghost::Pinky, Ghost::Inky, Ghost::Sue];

    pub fn index(self) -> usize {
        match self {
            Ghost::Blinky => 0,
            Ghost::Pinky => 1,
            Ghost::Inky => 2,
            Ghost::Sue => 3,
        }
    }
}
