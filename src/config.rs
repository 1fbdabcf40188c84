//! Controller configuration.
//!
//! Every constant of both controllers is an overridable field. Missing
//! fields in a JSON file fall back to the defaults.

use crate::mcts::hyperparameters::MctsHyperparameters;
use crate::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Forget the target after this many ticks without a sighting
    /// Default: 5
    pub tick_threshold: u32,

    /// Retreat when the target is closer than this to an available power pill
    /// Default: 15
    pub pill_proximity: u32,

    pub mcts: MctsHyperparameters,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            tick_threshold: 5,
            pill_proximity: 15,
            mcts: MctsHyperparameters::default(),
        }
    }
}

/// Weights of the cumulative reward signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    pub pill: f64,
    pub edible_ghost: f64,
    pub level: f64,
    /// Applied per tick of the current level
    pub tick_decay: f64,
    /// Applied per life lost since the start
    pub life_lost: f64,
    pub starting_lives: u32,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            pill: 1.0,
            edible_ghost: 50.0,
            level: 50.0,
            tick_decay: -0.05,
            life_lost: -25.0,
            starting_lives: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacmanConfig {
    /// Evade dangerous ghosts closer than this
    /// Default: 25
    pub evade_distance: u32,

    /// Default: 0.1
    pub learning_rate: f64,

    /// Default: 0.9
    pub discount_factor: f64,

    /// Probability of a random move in the learned fallback
    /// Default: 0.1
    pub exploration_probability: f64,

    pub reward: RewardWeights,
}

impl Default for PacmanConfig {
    fn default() -> Self {
        Self {
            evade_distance: 25,
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_probability: 0.1,
            reward: RewardWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub ghost: GhostConfig,
    pub pacman: PacmanConfig,
}

fn unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AgentError::Config(format!(
            "{} must lie in [0, 1], got {}",
            name, value
        )))
    }
}

impl AgentConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: AgentConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        log::debug!("Loaded agent config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.ghost.mcts.validate().map_err(AgentError::Config)?;
        if self.ghost.tick_threshold == 0 {
            return Err(AgentError::Config(
                "ghost.tick_threshold must be positive".to_string(),
            ));
        }
        unit_interval("pacman.learning_rate", self.pacman.learning_rate)?;
        unit_interval("pacman.discount_factor", self.pacman.discount_factor)?;
        unit_interval(
            "pacman.exploration_probability",
            self.pacman.exploration_probability,
        )?;
        Ok(())
    }
}
