//! Tabular action-value estimates keyed by (position, move).

use crate::game::moves::{Move, NodeIndex};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<(NodeIndex, Move), f64>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Stored estimate, 0.0 for pairs never updated.
    pub fn value(&self, state: NodeIndex, action: Move) -> f64 {
        self.values.get(&(state, action)).copied().unwrap_or(0.0)
    }

    /// Highest estimate among `moves`, ties to the first. `None` when empty.
    pub fn best_move(&self, state: NodeIndex, moves: &[Move]) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for &mv in moves {
            let q = self.value(state, mv);
            if best.map_or(true, |(_, best_q)| q > best_q) {
                best = Some((mv, q));
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// Highest estimate among `moves`; 0.0 when there is no move.
    pub fn max_value(&self, state: NodeIndex, moves: &[Move]) -> f64 {
        moves
            .iter()
            .map(|&mv| self.value(state, mv))
            .fold(None, |acc: Option<f64>, q| Some(acc.map_or(q, |a| a.max(q))))
            .unwrap_or(0.0)
    }

    /// One Q-learning step:
    /// `Q(s,a) <- Q(s,a) + alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`.
    /// Returns the new estimate.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        state: NodeIndex,
        action: Move,
        reward: f64,
        next_state: NodeIndex,
        next_moves: &[Move],
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current = self.value(state, action);
        let max_next = self.max_value(next_state, next_moves);
        let updated = current + learning_rate * (reward + discount_factor * max_next - current);
        self.values.insert((state, action), updated);
        updated
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(NodeIndex, Move), &f64)> {
        self.values.iter()
    }
}
