//! MCTS Hyperparameters Configuration
//!
//! Tunable parameters of the ghost search. Defaults reproduce the
//! communicating-ghost controller: 100 simulations of depth-20 random
//! rollouts with visit-count child selection.

use serde::{Deserialize, Serialize};

/// How a node's child is picked while descending the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Most-visited child, ties to the first-enumerated one. No exploration
    /// term, so a single branch can absorb the whole budget.
    #[default]
    MostVisited,
    /// UCB1: mean score plus `exploration * sqrt(ln(N_parent) / N_child)`.
    /// Unvisited children are tried first.
    Ucb1 { exploration: f64 },
}

/// MCTS hyperparameters configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsHyperparameters {
    /// Number of select/expand/simulate/backpropagate iterations per decision
    /// Default: 100
    pub num_simulations: usize,

    /// Maximum ticks played by one random rollout
    /// Default: 20
    pub rollout_depth: usize,

    /// Child selection during the descent
    /// Default: MostVisited
    pub selection: SelectionPolicy,
}

impl Default for MctsHyperparameters {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            rollout_depth: 20,
            selection: SelectionPolicy::MostVisited,
        }
    }
}

impl MctsHyperparameters {
    pub fn validate(&self) -> Result<(), String> {
        if let SelectionPolicy::Ucb1 { exploration } = self.selection {
            if !exploration.is_finite() || exploration < 0.0 {
                return Err(format!(
                    "UCB1 exploration constant must be finite and non-negative, got {}",
                    exploration
                ));
            }
        }
        Ok(())
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        let selection = match self.selection {
            SelectionPolicy::MostVisited => "most_visited".to_string(),
            SelectionPolicy::Ucb1 { exploration } => format!("ucb1[{:.2}]", exploration),
        };
        format!(
            "sims[{}]_depth[{}]_select[{}]",
            self.num_simulations, self.rollout_depth, selection
        )
    }
}
