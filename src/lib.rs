//! # Pac-Man Agents Library
//!
//! Decision controllers for a partially observable Ms Pac-Man game.
//!
//! ## Features
//!
//! - **Ghost team**: Monte Carlo Tree Search pursuit with sightings shared over a message board
//! - **Pac-Man**: priority chain of heuristics with a tabular Q-learning fallback
//! - **Game model**: `GameState` abstraction plus a small headless simulation
//! - **Runner**: plays full matches between the two controllers
//!
//! ## Usage
//!
//! ```rust
//! use pacman_agents::{
//!     config::AgentConfig,
//!     runner::MatchRunner,
//! };
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Controller configuration (JSON, defaults)
pub mod config;

/// Game model, messaging and the headless simulation
pub mod game;

/// Communicating MCTS ghost controller
pub mod ghost;

/// Logger setup
pub mod logging;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Q-learning Pac-Man controller
pub mod pacman;

/// Headless matches between the controllers
pub mod runner;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use game::*;

pub use ghost::GhostSearchPolicy;

pub use pacman::{PacmanLearningPolicy, QTable, RewardTrace};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the agents library
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AgentError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
