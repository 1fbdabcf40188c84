pub mod algorithm;
pub mod hyperparameters;
pub mod mcts_result;
pub mod node;
pub mod rollout;
pub mod selection;
pub mod tree;

pub use algorithm::{mcts_find_best_move, MonteCarloSearch};
pub use hyperparameters::{MctsHyperparameters, SelectionPolicy};
pub use mcts_result::SearchOutcome;
pub use node::{NodeId, SearchNode};
pub use rollout::{RandomRollout, Rollout, CAPTURED_SCORE, FAVOURABLE_SCORE};
pub use tree::SearchTree;
