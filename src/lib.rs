//! robogrid - deterministic cores for two small agent simulations.
//!
//! - [`cleaning`]: robot vacuums picking rooms by energy, usage, and dirt
//!   level, with deferred completions on a simulation clock.
//! - [`chase`]: two players stepping greedily toward a goal on an obstacle
//!   grid, with stochastic resolution of contested cells.
//!
//! Both are driven from outside, one tick at a time, through the
//! [`driver::Simulation`] trait. All randomness goes through
//! [`random::RandomSource`].

pub mod chase;
pub mod cleaning;
pub mod driver;
pub mod random;

pub use driver::{DriverError, Simulation, TickDriver};
pub use random::{RandomSource, RngSource, ScriptedSource};
