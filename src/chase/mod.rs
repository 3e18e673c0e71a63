//! Two-player grid chase with simultaneous moves and stochastic conflicts.

pub mod config;
pub mod conflict;
pub mod error;
pub mod game;
pub mod grid;
pub mod movement;
pub mod player;


pub use config::ChaseConfig;
pub use conflict::{resolve_conflict, Advantages, ConflictOutcome, Side};
pub use error::ChaseError;
pub use game::{ChaseGame, ChaseSnapshot, TurnReport};
pub use grid::{Coord, Direction, Grid};
pub use movement::{detect_collision, next_direction, step_toward};
pub use player::{Player, Stats};
