//! Search node stored in the [`SearchTree`](crate::mcts::tree::SearchTree) arena.
//!
//! Nodes hold an abstracted view of the chase: where the searching ghost and
//! its target would stand after following the moves on the path from the root.

use crate::game::moves::{Move, NodeIndex};

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub parent: Option<NodeId>,

    /// Move leading here from the parent; `None` at the root
    pub action: Option<Move>,

    pub ghost_node: NodeIndex,
    pub target_node: NodeIndex,

    pub visits: u32,

    /// Sum of rollout scores, saturating at the capture sentinels
    pub score: i64,

    pub children: Vec<NodeId>,
}

impl SearchNode {
    pub fn new_root(ghost_node: NodeIndex, target_node: NodeIndex) -> Self {
        Self {
            parent: None,
            action: None,
            ghost_node,
            target_node,
            visits: 0,
            score: 0,
            children: Vec::new(),
        }
    }

    pub fn new_child(
        parent: NodeId,
        action: Move,
        ghost_node: NodeIndex,
        target_node: NodeIndex,
    ) -> Self {
        Self {
            parent: Some(parent),
            action: Some(action),
            ghost_node,
            target_node,
            visits: 0,
            score: 0,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The simulated chase ended: ghost and target share a node.
    pub fn is_terminal(&self) -> bool {
        self.ghost_node == self.target_node
    }

    /// Last move made to reach this node, used to forbid reversals.
    pub fn last_move(&self) -> Move {
        self.action.unwrap_or(Move::Neutral)
    }

    pub fn average_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score as f64 / self.visits as f64
        }
    }

    pub fn record(&mut self, score: i64) {
        self.visits += 1;
        self.score = self.score.saturating_add(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_root() {
        let root = SearchNode::new_root(3, 9);
        assert!(root.parent.is_none());
        assert!(root.action.is_none());
        assert_eq!(root.last_move(), Move::Neutral);
        assert!(root.is_leaf());
        assert!(!root.is_terminal());
    }

    #[test]
    fn test_record_saturates() {
        let mut node = SearchNode::new_child(NodeId::ROOT, Move::Up, 1, 1);
        assert!(node.is_terminal());
        node.record(i64::MAX);
        node.record(i64::MAX);
        assert_eq!(node.visits, 2);
        assert_eq!(node.score, i64::MAX);
        node.record(i64::MIN);
        assert_eq!(node.visits, 3);
        assert_eq!(node.score, -1);
    }

    #[test]
    fn test_average_score() {
        let mut node = SearchNode::new_root(0, 1);
        assert_eq!(node.average_score(), 0.0);
        node.record(30);
        node.record(45);
        assert!((node.average_score() - 37.5).abs() < 1e-9);
    }
}
