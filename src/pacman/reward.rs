//! Reward signal for the learned fallback.
//!
//! The default [`CumulativeReward`] scores the whole game so far rather than
//! the last transition, so its magnitude grows over an episode. Anyone tuning
//! the learner may want a differential strategy instead; the trait keeps the
//! choice pluggable.

use crate::config::RewardWeights;
use crate::game::game_state::GameState;
use crate::Result;
use std::path::Path;

pub trait RewardFunction<G: GameState> {
    fn reward(&self, game: &G) -> f64;
}

#[derive(Debug, Clone, Default)]
pub struct CumulativeReward {
    pub weights: RewardWeights,
}

impl CumulativeReward {
    pub fn new(weights: RewardWeights) -> Self {
        Self { weights }
    }
}

impl<G: GameState> RewardFunction<G> for CumulativeReward {
    fn reward(&self, game: &G) -> f64 {
        let w = &self.weights;
        let pills_eaten = game
            .number_of_pills()
            .saturating_sub(game.number_of_active_pills()) as f64;
        let lives_lost = w.starting_lives as f64 - game.lives_remaining() as f64;

        pills_eaten * w.pill
            + game.ghosts_eaten() as f64 * w.edible_ghost
            + game.level() as f64 * w.level
            + game.current_tick() as f64 * w.tick_decay
            + lives_lost * w.life_lost
    }
}

/// Append-only record of the reward computed at every decision tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardTrace {
    samples: Vec<f64>,
}

impl Default for RewardTrace {
    fn default() -> Self {
        Self { samples: vec![0.0] }
    }
}

impl RewardTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reward: f64) {
        self.samples.push(reward);
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn last(&self) -> f64 {
        self.samples.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Writes `step,reward` rows for external plotting.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["step", "reward"])?;
        for (step, reward) in self.samples.iter().enumerate() {
            writer.write_record([step.to_string(), reward.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::maze::Maze;
    use crate::game::simulation::Simulation;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_game_reward_is_zero() {
        let sim = Simulation::new(Arc::new(Maze::default_layout().unwrap()));
        assert_eq!(CumulativeReward::default().reward(&sim), 0.0);
    }

    #[test]
    fn test_reward_components() {
        let maze = Maze::from_layout(&["#######", "#P...G#", "#######"]).unwrap();
        let mut sim = Simulation::new(Arc::new(maze));
        sim.set_pill_available(0, false);
        sim.set_pill_available(1, false);
        sim.set_level_tick(40);

        // 2 pills, 40 ticks of decay.
        let expected = 2.0 * 1.0 + 40.0 * -0.05;
        assert!((CumulativeReward::default().reward(&sim) - expected).abs() < 1e-9);

        let weights = RewardWeights {
            pill: 3.0,
            tick_decay: 0.0,
            ..Default::default()
        };
        assert!((CumulativeReward::new(weights).reward(&sim) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_trace_starts_with_zero_and_appends() {
        let mut trace = RewardTrace::new();
        assert_eq!(trace.samples(), &[0.0]);
        trace.push(1.5);
        trace.push(-2.0);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.last(), -2.0);
    }

    #[test]
    fn test_write_csv() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("rewards.csv");
        let mut trace = RewardTrace::new();
        trace.push(2.5);
        trace.write_csv(&path)?;

        let mut reader = csv::Reader::from_path(&path)?;
        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<csv::StringRecord>, _>>()?;
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "2.5");
        Ok(())
    }
}
