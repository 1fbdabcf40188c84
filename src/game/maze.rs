//! Maze graph parsed from an ASCII layout.
//!
//! Layout characters:
//! - `#` wall
//! - `.` corridor with a pill
//! - `o` corridor with a power pill
//! - `P` Pac-Man start
//! - `G` ghost lair
//! - ` ` empty corridor
//!
//! Nodes are the walkable cells in row-major order. All-pairs shortest path
//! distances are computed once by breadth-first search.

use crate::game::game_state::PathError;
use crate::game::moves::{Move, NodeIndex};
use std::collections::{HashMap, VecDeque};

const UNREACHABLE: u32 = u32::MAX;

/// Default playfield used by the match runner.
pub const DEFAULT_LAYOUT: &[&str] = &[
    "###############",
    "#o....#.#....o#",
    "#.###.#.#.###.#",
    "#.............#",
    "#.###.###.###.#",
    "#.....#G#.....#",
    "###.#.# #.#.###",
    "###.#.....#.###",
    "###.#.###.#.###",
    "#......P......#",
    "#.###.###.###.#",
    "#o.....#.....o#",
    "###############",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("layout has no walkable cell")]
    Empty,
    #[error("layout row {row} has width {width}, expected {expected}")]
    RaggedRow {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("unknown layout character {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
    #[error("layout must contain exactly one {0:?}")]
    MissingMarker(char),
}

#[derive(Debug, Clone)]
pub struct Maze {
    cells: Vec<(usize, usize)>,
    neighbours: Vec<[Option<NodeIndex>; 4]>,
    distances: Vec<u32>,
    pills: Vec<NodeIndex>,
    power_pills: Vec<NodeIndex>,
    pacman_start: NodeIndex,
    lair: NodeIndex,
}

fn direction_slot(mv: Move) -> Option<usize> {
    match mv {
        Move::Up => Some(0),
        Move::Right => Some(1),
        Move::Down => Some(2),
        Move::Left => Some(3),
        Move::Neutral => None,
    }
}

impl Maze {
    pub fn from_layout<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let expected = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        let mut cells = Vec::new();
        let mut pills = Vec::new();
        let mut power_pills = Vec::new();
        let mut pacman_start = None;
        let mut lair = None;

        for (row, line) in rows.iter().enumerate() {
            let width = line.as_ref().chars().count();
            if width != expected {
                return Err(MazeError::RaggedRow {
                    row,
                    width,
                    expected,
                });
            }
            for (col, ch) in line.as_ref().chars().enumerate() {
                let node = cells.len();
                match ch {
                    '#' => continue,
                    '.' => pills.push(node),
                    'o' => power_pills.push(node),
                    'P' if pacman_start.is_none() => pacman_start = Some(node),
                    'G' if lair.is_none() => lair = Some(node),
                    'P' | 'G' => return Err(MazeError::MissingMarker(ch)),
                    ' ' => {}
                    _ => return Err(MazeError::UnknownTile { ch, row, col }),
                }
                cells.push((row, col));
            }
        }

        if cells.is_empty() {
            return Err(MazeError::Empty);
        }
        let pacman_start = pacman_start.ok_or(MazeError::MissingMarker('P'))?;
        let lair = lair.ok_or(MazeError::MissingMarker('G'))?;

        let lookup: HashMap<(usize, usize), NodeIndex> =
            cells.iter().enumerate().map(|(i, &cell)| (cell, i)).collect();
        let neighbours = cells
            .iter()
            .map(|&(row, col)| {
                let mut slots = [None; 4];
                for (slot, mv) in Move::DIRECTIONS.iter().enumerate() {
                    let (dr, dc) = mv.offset();
                    let target = (row.checked_add_signed(dr), col.checked_add_signed(dc));
                    if let (Some(r), Some(c)) = target {
                        slots[slot] = lookup.get(&(r, c)).copied();
                    }
                }
                slots
            })
            .collect::<Vec<_>>();

        let distances = all_pairs_distances(&neighbours);

        Ok(Self {
            cells,
            neighbours,
            distances,
            pills,
            power_pills,
            pacman_start,
            lair,
        })
    }

    pub fn default_layout() -> Result<Self, MazeError> {
        Self::from_layout(DEFAULT_LAYOUT)
    }

    pub fn node_count(&self) -> usize {
        self.cells.len()
    }

    /// (row, column) of a node in the layout.
    pub fn cell(&self, node: NodeIndex) -> Option<(usize, usize)> {
        self.cells.get(node).copied()
    }

    pub fn pills(&self) -> &[NodeIndex] {
        &self.pills
    }

    pub fn power_pills(&self) -> &[NodeIndex] {
        &self.power_pills
    }

    pub fn pacman_start(&self) -> NodeIndex {
        self.pacman_start
    }

    pub fn lair(&self) -> NodeIndex {
        self.lair
    }

    pub fn neighbour(&self, node: NodeIndex, mv: Move) -> Option<NodeIndex> {
        let slot = direction_slot(mv)?;
        self.neighbours.get(node)?[slot]
    }

    pub fn possible_moves(&self, node: NodeIndex, last_move: Move) -> Vec<Move> {
        let open: Vec<Move> = Move::DIRECTIONS
            .iter()
            .copied()
            .filter(|&mv| self.neighbour(node, mv).is_some())
            .collect();
        if last_move == Move::Neutral || open.len() <= 1 {
            return open;
        }
        let reverse = last_move.opposite();
        let forward: Vec<Move> = open.iter().copied().filter(|&mv| mv != reverse).collect();
        if forward.is_empty() {
            open
        } else {
            forward
        }
    }

    fn check(&self, node: NodeIndex) -> Result<(), PathError> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(PathError::NodeOutOfRange {
                node,
                node_count: self.node_count(),
            })
        }
    }

    /// Graph distance; `u32::MAX` between disconnected nodes.
    pub fn distance(&self, from: NodeIndex, to: NodeIndex) -> Result<u32, PathError> {
        self.check(from)?;
        self.check(to)?;
        Ok(self.distances[from * self.node_count() + to])
    }

    /// Best move from `from` by distance to `to` among `candidates`.
    /// Ties go to the first candidate; `Neutral` when there is none.
    fn pick_move(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        candidates: &[Move],
        towards: bool,
    ) -> Result<Move, PathError> {
        self.check(from)?;
        self.check(to)?;
        let mut best: Option<(Move, u32)> = None;
        for &mv in candidates {
            let Some(next) = self.neighbour(from, mv) else {
                continue;
            };
            let d = self.distance(next, to)?;
            let better = match best {
                None => true,
                Some((_, best_d)) if towards => d < best_d,
                Some((_, best_d)) => d > best_d,
            };
            if better {
                best = Some((mv, d));
            }
        }
        Ok(best.map(|(mv, _)| mv).unwrap_or(Move::Neutral))
    }

    pub fn next_move_towards(&self, from: NodeIndex, to: NodeIndex) -> Result<Move, PathError> {
        if from == to {
            self.check(from)?;
            return Ok(Move::Neutral);
        }
        self.pick_move(from, to, &Move::DIRECTIONS, true)
    }

    pub fn next_move_away(&self, from: NodeIndex, to: NodeIndex) -> Result<Move, PathError> {
        self.pick_move(from, to, &Move::DIRECTIONS, false)
    }

    pub fn approximate_next_move_away(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        last_move: Move,
    ) -> Result<Move, PathError> {
        let moves = self.possible_moves(from, last_move);
        self.pick_move(from, to, &moves, false)
    }
}

fn all_pairs_distances(neighbours: &[[Option<NodeIndex>; 4]]) -> Vec<u32> {
    let n = neighbours.len();
    let mut distances = vec![UNREACHABLE; n * n];
    let mut queue = VecDeque::new();
    for source in 0..n {
        let row = &mut distances[source * n..(source + 1) * n];
        row[source] = 0;
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            let next_distance = row[node] + 1;
            for next in neighbours[node].iter().flatten() {
                if row[*next] == UNREACHABLE {
                    row[*next] = next_distance;
                    queue.push_back(*next);
                }
            }
        }
    }
    distances
}
