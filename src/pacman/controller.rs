//! Pac-Man controller: hand-written priority rules with a Q-learning fallback.
//!
//! Rules, first match wins:
//! 1. evade the first dangerous ghost closer than `evade_distance`
//! 2. head for the first visible pill, then the first visible power pill
//! 3. hunt the nearest visible edible ghost
//! 4. learned fallback (epsilon-greedy over the Q-table)

use crate::config::PacmanConfig;
use crate::game::game_state::{GameState, PathError};
use crate::game::moves::{Ghost, Move, NodeIndex};
use crate::pacman::q_table::QTable;
use crate::pacman::reward::{CumulativeReward, RewardFunction, RewardTrace};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Which rule produced the last decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionRule {
    Evade,
    PillSeek,
    Hunt,
    Learned,
    Reverse,
}

pub struct PacmanLearningPolicy<R: Rng = StdRng, F = CumulativeReward> {
    config: PacmanConfig,
    reward_fn: F,
    q_table: QTable,
    rewards: RewardTrace,
    /// (state, action) of the last learned decision, awaiting its update.
    /// Survives heuristic ticks in between.
    pending: Option<(NodeIndex, Move)>,
    last_rule: Option<DecisionRule>,
    rng: R,
}

impl PacmanLearningPolicy<StdRng, CumulativeReward> {
    pub fn new(config: PacmanConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn seeded(config: PacmanConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PacmanLearningPolicy<R, CumulativeReward> {
    pub fn with_rng(config: PacmanConfig, rng: R) -> Self {
        let reward_fn = CumulativeReward::new(config.reward.clone());
        Self::with_reward(config, reward_fn, rng)
    }
}

impl<R: Rng, F> PacmanLearningPolicy<R, F> {
    /// Swap in another reward shaping strategy.
    pub fn with_reward(mut config: PacmanConfig, reward_fn: F, rng: R) -> Self {
        let epsilon = config.exploration_probability;
        if !(0.0..=1.0).contains(&epsilon) {
            let clamped = if epsilon > 1.0 { 1.0 } else { 0.0 };
            log::warn!("Exploration probability {} clamped to {}", epsilon, clamped);
            config.exploration_probability = clamped;
        }
        Self {
            config,
            reward_fn,
            q_table: QTable::new(),
            rewards: RewardTrace::new(),
            pending: None,
            last_rule: None,
            rng,
        }
    }

    pub fn config(&self) -> &PacmanConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn rewards(&self) -> &RewardTrace {
        &self.rewards
    }

    pub fn last_rule(&self) -> Option<DecisionRule> {
        self.last_rule
    }

    /// Episode boundary: the next learned decision starts without a
    /// pending transition. Learned values are kept.
    pub fn end_episode(&mut self) {
        self.pending = None;
        self.last_rule = None;
    }

    /// Forget everything learned.
    pub fn reset(&mut self) {
        self.end_episode();
        self.q_table.clear();
        self.rewards = RewardTrace::new();
    }

    pub fn decide<G: GameState>(&mut self, game: &G) -> Move
    where
        F: RewardFunction<G>,
    {
        let Some(current) = game.pacman_node() else {
            return Move::Neutral;
        };
        let reward = self.reward_fn.reward(game);
        self.rewards.push(reward);

        match self.choose(game, current, reward) {
            Ok((rule, mv)) => {
                log::trace!("Pac-Man at {}: {:?} via {:?}", current, mv, rule);
                self.last_rule = Some(rule);
                mv
            }
            Err(e) => {
                log::warn!("Pac-Man at {} could not plan a move: {}", current, e);
                self.last_rule = None;
                Move::Neutral
            }
        }
    }

    fn choose<G: GameState>(
        &mut self,
        game: &G,
        current: NodeIndex,
        reward: f64,
    ) -> Result<(DecisionRule, Move), PathError> {
        if let Some(mv) = self.evade(game, current)? {
            return Ok((DecisionRule::Evade, mv));
        }
        if let Some(mv) = seek_pill(game, current)? {
            return Ok((DecisionRule::PillSeek, mv));
        }
        if let Some(mv) = hunt(game, current)? {
            return Ok((DecisionRule::Hunt, mv));
        }

        let moves = game.possible_moves(current, game.pacman_last_move());
        if moves.is_empty() {
            return Ok((DecisionRule::Reverse, game.pacman_last_move().opposite()));
        }
        Ok((DecisionRule::Learned, self.learned_move(current, &moves, reward)))
    }

    fn evade<G: GameState>(
        &self,
        game: &G,
        current: NodeIndex,
    ) -> Result<Option<Move>, PathError> {
        for ghost in Ghost::ALL {
            if game.ghost_edible_time(ghost) > 0 || game.ghost_lair_time(ghost) > 0 {
                continue;
            }
            let Some(node) = game.ghost_node(ghost) else {
                continue;
            };
            if game.shortest_path_distance(current, node)? < self.config.evade_distance {
                return game.next_move_away(current, node).map(Some);
            }
        }
        Ok(None)
    }

    fn learned_move(&mut self, current: NodeIndex, moves: &[Move], reward: f64) -> Move {
        let selected = if self.rng.random_bool(self.config.exploration_probability) {
            moves.choose(&mut self.rng).copied()
        } else {
            self.q_table.best_move(current, moves)
        }
        .unwrap_or(Move::Neutral);

        if let Some((state, action)) = self.pending {
            let q = self.q_table.update(
                state,
                action,
                reward,
                current,
                moves,
                self.config.learning_rate,
                self.config.discount_factor,
            );
            log::trace!("Q({}, {:?}) <- {:.3} (reward {:.2})", state, action, q, reward);
        }
        self.pending = Some((current, selected));
        selected
    }
}

/// First visible pill, then first visible power pill.
fn seek_pill<G: GameState>(game: &G, current: NodeIndex) -> Result<Option<Move>, PathError> {
    let pill = game
        .pill_indices()
        .iter()
        .enumerate()
        .find(|&(i, _)| game.is_pill_available(i) == Some(true))
        .or_else(|| {
            game.power_pill_indices()
                .iter()
                .enumerate()
                .find(|&(i, _)| game.is_power_pill_available(i) == Some(true))
        });
    match pill {
        Some((_, &node)) => game.next_move_towards(current, node).map(Some),
        None => Ok(None),
    }
}

/// Nearest visible edible ghost; ties go to the first in enumeration order.
fn hunt<G: GameState>(game: &G, current: NodeIndex) -> Result<Option<Move>, PathError> {
    let mut nearest: Option<(NodeIndex, u32)> = None;
    for ghost in Ghost::ALL {
        if game.ghost_edible_time(ghost) == 0 {
            continue;
        }
        let Some(node) = game.ghost_node(ghost) else {
            continue;
        };
        let distance = game.shortest_path_distance(current, node)?;
        if nearest.map_or(true, |(_, best)| distance < best) {
            nearest = Some((node, distance));
        }
    }
    match nearest {
        Some((node, _)) => game.next_move_towards(current, node).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::maze::Maze;
    use crate::game::simulation::{Observer, Simulation};
    use std::sync::Arc;

    // 0 1 2 3 4 5 6 7 8(o)
    //         9
    //        10 (lair)
    fn hallway() -> Simulation {
        let maze = Maze::from_layout(&[
            "###########",
            "#P.......o#",
            "#####.#####",
            "#####G#####",
            "###########",
        ])
        .unwrap();
        let mut sim = Simulation::new(Arc::new(maze));
        for ghost in Ghost::ALL {
            sim.set_ghost_lair_time(ghost, 100);
        }
        sim
    }

    fn greedy() -> PacmanConfig {
        PacmanConfig {
            exploration_probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_seeks_first_visible_pill() {
        let mut sim = hallway();
        sim.place_pacman(4, Move::Neutral);
        sim.set_pill_available(0, false);
        sim.set_pill_available(1, false);
        // Pill 2 sits at node 3.
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);
        assert_eq!(policy.decide(&sim.view_for(Observer::Pacman)), Move::Left);
        assert_eq!(policy.last_rule(), Some(DecisionRule::PillSeek));
    }

    #[test]
    fn test_power_pill_sought_after_pills() {
        let mut sim = hallway();
        sim.place_pacman(4, Move::Neutral);
        for i in 0..sim.number_of_pills() {
            sim.set_pill_available(i, false);
        }
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);
        assert_eq!(policy.decide(&sim), Move::Right);
    }

    #[test]
    fn test_evades_before_anything_else() {
        let mut sim = hallway();
        sim.place_pacman(3, Move::Neutral);
        sim.place_ghost(Ghost::Inky, 5, Move::Left);
        sim.place_ghost(Ghost::Sue, 0, Move::Neutral);
        sim.set_ghost_edible_time(Ghost::Sue, 10);
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);
        assert_eq!(policy.decide(&sim), Move::Left);
        assert_eq!(policy.last_rule(), Some(DecisionRule::Evade));
    }

    #[test]
    fn test_hunts_nearest_edible_ghost() {
        let mut sim = hallway();
        sim.clear_pills();
        sim.place_pacman(4, Move::Neutral);
        sim.place_ghost(Ghost::Blinky, 0, Move::Neutral);
        sim.place_ghost(Ghost::Pinky, 7, Move::Neutral);
        sim.set_ghost_edible_time(Ghost::Blinky, 20);
        sim.set_ghost_edible_time(Ghost::Pinky, 20);
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);
        assert_eq!(policy.decide(&sim), Move::Right);
        assert_eq!(policy.last_rule(), Some(DecisionRule::Hunt));
    }

    #[test]
    fn test_learned_fallback_updates_previous_pair() {
        let mut sim = hallway();
        sim.clear_pills();
        sim.place_pacman(2, Move::Right);
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);

        // Only Right is legal without reversing.
        assert_eq!(policy.decide(&sim), Move::Right);
        assert_eq!(policy.last_rule(), Some(DecisionRule::Learned));
        assert!(policy.q_table().is_empty());
        assert_eq!(policy.rewards().len(), 2);

        sim.place_pacman(3, Move::Right);
        sim.set_level_tick(1);
        assert_eq!(policy.decide(&sim), Move::Right);
        assert_eq!(policy.q_table().len(), 1);
        // 7 pills eaten, 1 tick of decay; next-state values are all zero
        let expected = 0.1 * (7.0 - 0.05);
        assert!((policy.q_table().value(2, Move::Right) - expected).abs() < 1e-12);
        assert!((policy.rewards().last() - 6.95).abs() < 1e-12);
    }

    #[test]
    fn test_pending_transition_survives_heuristic_ticks() {
        let mut sim = hallway();
        sim.clear_pills();
        sim.place_pacman(2, Move::Right);
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);
        assert_eq!(policy.decide(&sim), Move::Right);

        sim.set_pill_available(0, true);
        assert_eq!(policy.decide(&sim), Move::Left);
        assert_eq!(policy.last_rule(), Some(DecisionRule::PillSeek));
        assert!(policy.q_table().is_empty());

        sim.clear_pills();
        sim.place_pacman(3, Move::Right);
        assert_eq!(policy.decide(&sim), Move::Right);
        assert_eq!(policy.q_table().len(), 1);
        assert!((policy.q_table().value(2, Move::Right) - 0.7).abs() < 1e-12);
        // One reward sample per decision, heuristic ticks included.
        assert_eq!(policy.rewards().len(), 4);
    }

    #[test]
    fn test_exploration_probability_is_clamped() {
        let config = PacmanConfig {
            exploration_probability: 3.0,
            ..Default::default()
        };
        let policy = PacmanLearningPolicy::seeded(config, 3);
        assert_eq!(policy.config().exploration_probability, 1.0);

        let config = PacmanConfig {
            exploration_probability: f64::NAN,
            ..Default::default()
        };
        let mut policy = PacmanLearningPolicy::seeded(config, 3);
        assert_eq!(policy.config().exploration_probability, 0.0);

        let mut sim = hallway();
        sim.clear_pills();
        sim.place_pacman(2, Move::Right);
        assert_eq!(policy.decide(&sim), Move::Right);
    }

    #[test]
    fn test_end_episode_keeps_values_and_reset_drops_them() {
        let mut sim = hallway();
        sim.clear_pills();
        sim.place_pacman(2, Move::Right);
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);
        policy.decide(&sim);
        policy.decide(&sim);
        assert_eq!(policy.q_table().len(), 1);

        policy.end_episode();
        assert_eq!(policy.last_rule(), None);
        assert_eq!(policy.q_table().len(), 1);

        policy.reset();
        assert!(policy.q_table().is_empty());
        assert_eq!(policy.rewards().samples(), &[0.0]);
    }

    #[test]
    fn test_path_error_yields_neutral() {
        let mut sim = hallway();
        sim.place_pacman(42, Move::Neutral);
        let mut policy = PacmanLearningPolicy::seeded(greedy(), 3);
        assert_eq!(policy.decide(&sim), Move::Neutral);
        assert_eq!(policy.last_rule(), None);
    }
}
