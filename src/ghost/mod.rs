pub mod controller;
pub mod memory;

pub use controller::GhostSearchPolicy;
pub use memory::{adopt_sightings, TargetMemory};
