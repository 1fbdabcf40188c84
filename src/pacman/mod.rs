pub mod controller;
pub mod q_table;
pub mod reward;

pub use controller::{DecisionRule, PacmanLearningPolicy};
pub use q_table::QTable;
pub use reward::{CumulativeReward, RewardFunction, RewardTrace};
