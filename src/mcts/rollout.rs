//! Simulation step: estimate the value of a node by playing the game forward.

use crate::game::game_state::GameState;
use crate::game::moves::{Ghost, Move};
use crate::mcts::node::NodeId;
use crate::mcts::tree::SearchTree;
use rand::prelude::IndexedRandom;
use rand::Rng;

/// Score of a rollout in which the searching ghost gets eaten ("minus infinity").
pub const CAPTURED_SCORE: i64 = i64::MIN;

/// Score of a rollout that ends the episode in the ghosts' favour ("plus infinity").
pub const FAVOURABLE_SCORE: i64 = i64::MAX;

/// Scores a freshly selected node. Implementations may be deterministic
/// stand-ins for the random playout.
pub trait Rollout<G: GameState> {
    fn rollout(&mut self, game: &G, ghost: Ghost, tree: &SearchTree, node: NodeId) -> i64;
}

/// Random playout on a clone of the live game state.
///
/// Both the ghost and Pac-Man pick uniformly among their legal moves each
/// tick. The other ghosts keep their heading.
pub struct RandomRollout<'r, R: Rng> {
    depth: usize,
    rng: &'r mut R,
}

impl<'r, R: Rng> RandomRollout<'r, R> {
    pub fn new(depth: usize, rng: &'r mut R) -> Self {
        Self { depth, rng }
    }

    fn random_move<G: GameState>(
        &mut self,
        game: &G,
        node: Option<usize>,
        last_move: Move,
    ) -> Move {
        let Some(node) = node else {
            return Move::Neutral;
        };
        let moves = game.possible_moves(node, last_move);
        moves.choose(&mut *self.rng).copied().unwrap_or(Move::Neutral)
    }
}

impl<G: GameState, R: Rng> Rollout<G> for RandomRollout<'_, R> {
    fn rollout(&mut self, game: &G, ghost: Ghost, _tree: &SearchTree, _node: NodeId) -> i64 {
        let mut simulated = game.clone();
        let mut score = simulated.score();

        for _ in 0..self.depth {
            let ghost_move = self.random_move(
                &simulated,
                simulated.ghost_node(ghost),
                simulated.ghost_last_move(ghost),
            );
            let pacman_move = self.random_move(
                &simulated,
                simulated.pacman_node(),
                simulated.pacman_last_move(),
            );
            simulated.advance(pacman_move, &[(ghost, ghost_move)]);

            if simulated.was_ghost_eaten(ghost) {
                return CAPTURED_SCORE;
            }
            if simulated.was_pacman_eaten() || simulated.is_game_over() {
                return FAVOURABLE_SCORE;
            }
            score = simulated.score();
        }

        score
    }
}
