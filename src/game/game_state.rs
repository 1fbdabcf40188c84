//! Read-only view of the host game engine, as seen by one controller.
//!
//! Controllers only ever query a `GameState`. The one mutating primitive,
//! [`GameState::advance`], is called on clones during search rollouts so the
//! live snapshot is never touched.

use crate::game::moves::{Ghost, Move, NodeIndex};

/// Failure of a path query on the maze graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("node {node} is out of range (maze has {node_count} nodes)")]
    NodeOutOfRange { node: NodeIndex, node_count: usize },
}

pub trait GameState: Clone {
    /// Ticks elapsed in the current level.
    fn current_tick(&self) -> u32;

    fn level(&self) -> u32;
    fn score(&self) -> i64;
    fn lives_remaining(&self) -> u32;
    fn node_count(&self) -> usize;

    /// Pac-Man's node, or `None` when it is not observable.
    fn pacman_node(&self) -> Option<NodeIndex>;
    fn pacman_last_move(&self) -> Move;

    /// A ghost's node, or `None` when it is not observable.
    fn ghost_node(&self, ghost: Ghost) -> Option<NodeIndex>;
    fn ghost_last_move(&self, ghost: Ghost) -> Move;
    /// Remaining ticks of edibility; zero when dangerous.
    fn ghost_edible_time(&self, ghost: Ghost) -> u32;
    /// Remaining ticks of confinement in the lair.
    fn ghost_lair_time(&self, ghost: Ghost) -> u32;
    /// Whether the ghost sits on a junction and must be given a move this tick.
    fn ghost_requires_action(&self, ghost: Ghost) -> bool;
    fn ghosts_eaten(&self) -> u32;

    fn pill_indices(&self) -> &[NodeIndex];
    fn power_pill_indices(&self) -> &[NodeIndex];
    /// Availability of the `pill`-th pill; `None` when it is not observable.
    fn is_pill_available(&self, pill: usize) -> Option<bool>;
    /// Availability of the `pill`-th power pill; `None` when it is not observable.
    fn is_power_pill_available(&self, pill: usize) -> Option<bool>;
    fn number_of_pills(&self) -> usize;
    fn number_of_active_pills(&self) -> usize;

    /// Legal moves from `node` for a mover whose previous move was
    /// `last_move`. Reversal is excluded unless it is the only way out;
    /// `Move::Neutral` as last move disables the restriction.
    fn possible_moves(&self, node: NodeIndex, last_move: Move) -> Vec<Move>;
    fn neighbour(&self, node: NodeIndex, mv: Move) -> Option<NodeIndex>;
    fn shortest_path_distance(&self, from: NodeIndex, to: NodeIndex) -> Result<u32, PathError>;
    fn next_move_towards(&self, from: NodeIndex, to: NodeIndex) -> Result<Move, PathError>;
    fn next_move_away(&self, from: NodeIndex, to: NodeIndex) -> Result<Move, PathError>;
    /// Move away from `to`, restricted to the legal moves given `last_move`.
    fn approximate_next_move_away(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        last_move: Move,
    ) -> Result<Move, PathError>;

    /// Advances the game by one tick. Ghosts missing from `ghost_moves`
    /// keep their current heading.
    fn advance(&mut self, pacman_move: Move, ghost_moves: &[(Ghost, Move)]);
    fn was_pacman_eaten(&self) -> bool;
    fn was_ghost_eaten(&self, ghost: Ghost) -> bool;
    fn is_game_over(&self) -> bool;
}
