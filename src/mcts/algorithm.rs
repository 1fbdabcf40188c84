//! Fixed-budget Monte Carlo Tree Search over simplified ghost/target positions.

use crate::game::game_state::GameState;
use crate::game::moves::{Ghost, Move, NodeIndex};
use crate::mcts::hyperparameters::MctsHyperparameters;
use crate::mcts::mcts_result::SearchOutcome;
use crate::mcts::node::NodeId;
use crate::mcts::rollout::Rollout;
use crate::mcts::selection::select_leaf;
use crate::mcts::tree::SearchTree;

pub struct MonteCarloSearch<'a> {
    params: &'a MctsHyperparameters,
}

impl<'a> MonteCarloSearch<'a> {
    pub fn new(params: &'a MctsHyperparameters) -> Self {
        Self { params }
    }

    /// Runs `num_simulations` iterations of select, expand, simulate and
    /// backpropagate from a root where `ghost` stands on `ghost_node` and the
    /// target on `target_node`.
    pub fn search<G, R>(
        &self,
        game: &G,
        ghost: Ghost,
        ghost_node: NodeIndex,
        target_node: NodeIndex,
        rollout: &mut R,
    ) -> SearchOutcome
    where
        G: GameState,
        R: Rollout<G>,
    {
        let mut tree = SearchTree::new(ghost_node, target_node);

        for _ in 0..self.params.num_simulations {
            let selected = select_leaf(&tree, self.params.selection);
            self.expand(&mut tree, selected, game);
            let score = rollout.rollout(game, ghost, &tree, selected);
            tree.backpropagate(selected, score);
        }

        let outcome = SearchOutcome::from_tree(&tree);
        log::trace!(
            "{:?} search [{}]: {:?} from {:?} ({} nodes)",
            ghost,
            self.params.to_config_string(),
            outcome.best_move,
            outcome.root_visits,
            tree.len()
        );
        outcome
    }

    /// One child per legal move from the node's ghost position. Ghost and
    /// target both step along the move; a target with no neighbour that
    /// way stays where it is.
    fn expand<G: GameState>(&self, tree: &mut SearchTree, id: NodeId, game: &G) {
        let node = tree.get(id);
        if !node.is_leaf() || node.is_terminal() {
            return;
        }
        let (ghost_node, target_node) = (node.ghost_node, node.target_node);
        let moves = game.possible_moves(ghost_node, node.last_move());

        for mv in moves {
            let Some(next_ghost) = game.neighbour(ghost_node, mv) else {
                continue;
            };
            let next_target = game.neighbour(target_node, mv).unwrap_or(target_node);
            tree.add_child(id, mv, next_ghost, next_target);
        }
    }
}

/// Convenience wrapper returning only the chosen move.
pub fn mcts_find_best_move<G, R>(
    game: &G,
    ghost: Ghost,
    ghost_node: NodeIndex,
    target_node: NodeIndex,
    params: &MctsHyperparameters,
    rollout: &mut R,
) -> Move
where
    G: GameState,
    R: Rollout<G>,
{
    MonteCarloSearch::new(params)
        .search(game, ghost, ghost_node, target_node, rollout)
        .best_move
}
