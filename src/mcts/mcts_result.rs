use crate::game::moves::Move;
use crate::mcts::tree::SearchTree;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Root's most-visited move, `Move::Neutral` when the root was never expanded
    pub best_move: Move,
    pub root_visits: Vec<(Move, u32)>,
    pub root_total_visits: u32,
}

impl SearchOutcome {
    pub fn from_tree(tree: &SearchTree) -> Self {
        let best_move = tree
            .best_action()
            .map(|(mv, _)| mv)
            .unwrap_or(Move::Neutral);
        Self {
            best_move,
            root_visits: tree.root_visits(),
            root_total_visits: tree.get(tree.root()).visits,
        }
    }

    /// Visits of the chosen move; zero for `Move::Neutral`.
    pub fn best_visits(&self) -> u32 {
        self.root_visits
            .iter()
            .find(|(mv, _)| *mv == self.best_move)
            .map(|&(_, visits)| visits)
            .unwrap_or(0)
    }
}
