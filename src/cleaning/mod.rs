//! Robot-vacuum assignment engine.
//!
//! Each tick picks one idle robot and one room for it; the cleaning takes
//! effect after a fixed delay on the simulation clock.

pub mod config;
pub mod engine;
pub mod error;
pub mod simulation;
pub mod timers;
pub mod types;


pub use config::CleaningConfig;
pub use error::CleaningError;
pub use simulation::{CleaningSimulation, CleaningSnapshot, TickOutcome};
pub use timers::{CompletionHandle, PendingCompletion, PendingCompletions};
pub use types::{Robot, RobotId, RobotStatus, Room, RoomSize};
