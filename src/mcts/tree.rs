//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous `Vec` and point at each other through
//! [`NodeId`] indices, so the whole tree is dropped in one go after each
//! decision.

use crate::game::moves::{Move, NodeIndex};
use crate::mcts::node::{NodeId, SearchNode};

#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new(ghost_node: NodeIndex, target_node: NodeIndex) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(ghost_node, target_node)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        action: Move,
        ghost_node: NodeIndex,
        target_node: NodeIndex,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes
            .push(SearchNode::new_child(parent, action, ghost_node, target_node));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Adds `score` to every node from `leaf` up to the root, one visit each.
    pub fn backpropagate(&mut self, leaf: NodeId, score: i64) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.record(score);
            current = node.parent;
        }
    }

    /// Root's most-visited child as `(move, visits)`; ties go to the
    /// first-enumerated child. `None` when the root was never expanded.
    pub fn best_action(&self) -> Option<(Move, u32)> {
        let root = self.get(self.root());
        let mut best: Option<(Move, u32)> = None;
        for &child in &root.children {
            let node = self.get(child);
            let Some(action) = node.action else { continue };
            if best.map_or(true, |(_, visits)| node.visits > visits) {
                best = Some((action, node.visits));
            }
        }
        best
    }

    /// Visit count per root child, in enumeration order.
    pub fn root_visits(&self) -> Vec<(Move, u32)> {
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&child| {
                let node = self.get(child);
                node.action.map(|mv| (mv, node.visits))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_lone_root() {
        let tree = SearchTree::new(4, 8);
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root()).is_leaf());
        assert_eq!(tree.best_action(), None);
        assert!(tree.root_visits().is_empty());
    }

    #[test]
    fn test_add_child_links_parent() {
        let mut tree = SearchTree::new(4, 8);
        let up = tree.add_child(tree.root(), Move::Up, 1, 5);
        let left = tree.add_child(tree.root(), Move::Left, 3, 7);

        assert_eq!(up, NodeId(1));
        assert_eq!(left, NodeId(2));
        assert_eq!(tree.get(tree.root()).children, vec![up, left]);
        assert_eq!(tree.get(left).parent, Some(NodeId::ROOT));
        assert_eq!(tree.get(left).action, Some(Move::Left));
    }

    #[test]
    fn test_backpropagate_updates_path_only() {
        let mut tree = SearchTree::new(0, 9);
        let a = tree.add_child(tree.root(), Move::Up, 1, 9);
        let b = tree.add_child(tree.root(), Move::Down, 2, 9);
        let a1 = tree.add_child(a, Move::Right, 3, 9);

        tree.backpropagate(a1, 10);
        tree.backpropagate(a1, 5);

        assert_eq!(tree.get(a1).visits, 2);
        assert_eq!(tree.get(a1).score, 15);
        assert_eq!(tree.get(a).visits, 2);
        assert_eq!(tree.get(tree.root()).visits, 2);
        assert_eq!(tree.get(b).visits, 0);
    }

    #[test]
    fn test_best_action_prefers_visits_then_order() {
        let mut tree = SearchTree::new(0, 9);
        let a = tree.add_child(tree.root(), Move::Up, 1, 9);
        let b = tree.add_child(tree.root(), Move::Down, 2, 9);
        assert_eq!(tree.best_action(), Some((Move::Up, 0)));

        tree.backpropagate(b, 1);
        assert_eq!(tree.best_action(), Some((Move::Down, 1)));

        tree.backpropagate(a, 1);
        assert_eq!(tree.best_action(), Some((Move::Up, 1)));
        assert_eq!(tree.root_visits(), vec![(Move::Up, 1), (Move::Down, 1)]);
    }
}
