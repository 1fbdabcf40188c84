//! Selection step of the search: descend from the root to the node that
//! will be expanded.

use crate::mcts::hyperparameters::SelectionPolicy;
use crate::mcts::node::NodeId;
use crate::mcts::tree::SearchTree;

/// Picks the child of `parent` to descend into, or `None` for a leaf.
pub fn select_best_child(
    tree: &SearchTree,
    parent: NodeId,
    policy: SelectionPolicy,
) -> Option<NodeId> {
    let node = tree.get(parent);
    match policy {
        SelectionPolicy::MostVisited => {
            let mut best: Option<(NodeId, u32)> = None;
            for &child in &node.children {
                let visits = tree.get(child).visits;
                if best.map_or(true, |(_, best_visits)| visits > best_visits) {
                    best = Some((child, visits));
                }
            }
            best.map(|(id, _)| id)
        }
        SelectionPolicy::Ucb1 { exploration } => {
            let parent_visits = node.visits.max(1) as f64;
            let mut best: Option<(NodeId, f64)> = None;
            for &child in &node.children {
                let child_node = tree.get(child);
                let ucb = if child_node.visits == 0 {
                    f64::INFINITY
                } else {
                    child_node.average_score()
                        + exploration * (parent_visits.ln() / child_node.visits as f64).sqrt()
                };
                if best.map_or(true, |(_, best_ucb)| ucb > best_ucb) {
                    best = Some((child, ucb));
                }
            }
            best.map(|(id, _)| id)
        }
    }
}

/// Descends until a leaf or a terminal node and returns it.
pub fn select_leaf(tree: &SearchTree, policy: SelectionPolicy) -> NodeId {
    let mut current = tree.root();
    loop {
        let node = tree.get(current);
        if node.is_leaf() || node.is_terminal() {
            return current;
        }
        match select_best_child(tree, current, policy) {
            Some(child) => current = child,
            None => return current,
        }
    }
}
