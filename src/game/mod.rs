pub mod game_state;
pub mod maze;
pub mod messenger;
pub mod moves;
pub mod simulation;

pub use game_state::{GameState, PathError};
pub use maze::{Maze, MazeError};
pub use messenger::{Message, MessageBoard, MessageKind, Messenger};
pub use moves::{Ghost, Move, NodeIndex};
pub use simulation::{Observer, Simulation};
