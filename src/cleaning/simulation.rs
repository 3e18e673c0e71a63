//! The cleaning simulation: owned state plus the actions a front end triggers.

use qtty::{Quantity, Second};
use rand::rngs::StdRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::CleaningConfig;
use super::engine;
use super::error::CleaningError;
use super::timers::{CompletionHandle, PendingCompletion, PendingCompletions};
use super::types::{Robot, RobotId, Room};
use crate::driver::Simulation;
use crate::random::{RandomSource, RngSource};

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A robot was sent to a room.
    Assigned {
        robot: RobotId,
        room: String,
        handle: CompletionHandle,
    },
    /// No idle robot with energy left.
    NoRobot,
    /// The chosen robot cannot afford any free room.
    NoRoom { robot: RobotId },
}

impl TickOutcome {
    pub fn is_assigned(&self) -> bool {
        matches!(self, TickOutcome::Assigned { .. })
    }
}

/// Read-only view of the simulation for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CleaningSnapshot {
    pub now: Quantity<Second>,
    pub robots: Vec<Robot>,
    pub rooms: Vec<Room>,
    pub pending: Vec<PendingCompletion>,
}

/// Robot-vacuum scheduler.
///
/// # Lifecycle
///
/// 1. Build with [`CleaningSimulation::new`] (seeded) or
///    [`CleaningSimulation::with_source`] (custom randomness).
/// 2. Call [`CleaningSimulation::tick`] to dispatch a robot and
///    [`CleaningSimulation::advance_clock`] to let cleanings finish.
/// 3. [`CleaningSimulation::reset`] restores the configured initial state.
/// 4. [`CleaningSimulation::teardown`] cancels pending completions and
///    consumes the simulation.
#[derive(Debug)]
pub struct CleaningSimulation<R: RandomSource = RngSource<StdRng>> {
    config: CleaningConfig,
    robots: Vec<Robot>,
    rooms: Vec<Room>,
    pending: PendingCompletions,
    now: Quantity<Second>,
    rng: R,
}

impl CleaningSimulation {
    /// Creates a simulation whose randomness is seeded with `seed`.
    pub fn new(config: CleaningConfig, seed: u64) -> Result<Self, CleaningError> {
        Self::with_source(config, RngSource::seeded(seed))
    }
}

impl<R: RandomSource> CleaningSimulation<R> {
    /// Creates a simulation drawing randomness from `rng`.
    ///
    /// Fails if the configured initial state is inconsistent.
    pub fn with_source(config: CleaningConfig, rng: R) -> Result<Self, CleaningError> {
        config.validate()?;
        Ok(Self {
            robots: config.robots.clone(),
            rooms: config.rooms.clone(),
            pending: PendingCompletions::new(),
            now: Quantity::new(0.0),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn pending(&self) -> &PendingCompletions {
        &self.pending
    }

    /// Current simulation time.
    pub fn now(&self) -> Quantity<Second> {
        self.now
    }

    /// Looks up a robot by id.
    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id == id)
    }

    /// Looks up a room by name.
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    /// Dispatches the best available robot to the best room it can afford.
    ///
    /// Does nothing when no robot or no room is eligible.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(robot) = engine::select_robot(&self.robots) else {
            tracing::trace!("no eligible robot");
            return TickOutcome::NoRobot;
        };
        let robot_id = robot.id;

        let Some(room) =
            engine::select_room(&self.rooms, &self.robots, robot, &self.config, &mut self.rng)
        else {
            tracing::trace!(robot = robot_id, "no eligible room");
            return TickOutcome::NoRoom { robot: robot_id };
        };
        let room = room.clone();

        let Some(robot) = self.robots.iter_mut().find(|r| r.id == robot_id) else {
            return TickOutcome::NoRobot;
        };
        let handle = engine::assign(
            robot,
            &room,
            &mut self.pending,
            self.now,
            self.config.completion_delay,
        );

        TickOutcome::Assigned {
            robot: robot_id,
            room: room.name,
            handle,
        }
    }

    /// Moves the clock forward and applies every completion that came due.
    ///
    /// Returns the completions that fired, in firing order.
    pub fn advance_clock(&mut self, dt: Quantity<Second>) -> Vec<PendingCompletion> {
        self.now = self.now + dt;
        let due = self.pending.drain_due(self.now);

        let mut fired = Vec::with_capacity(due.len());
        for completion in due {
            match engine::complete_assignment(
                &mut self.robots,
                &mut self.rooms,
                completion.robot,
                &completion.room,
                completion.size,
                &self.config,
            ) {
                Ok(()) => fired.push(completion),
                Err(err) => {
                    tracing::warn!(handle = %completion.handle, %err, "dropping stale completion")
                }
            }
        }
        fired
    }

    /// Recharges an idle robot. Returns its new energy level.
    pub fn recharge(&mut self, id: RobotId) -> Result<u32, CleaningError> {
        let robot = self
            .robots
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CleaningError::UnknownRobot(id))?;
        engine::recharge_robot(robot, &self.config)
    }

    /// Gives every room a fresh uniform load in `0..max_load`.
    pub fn randomize_load(&mut self) {
        let bound = self.config.max_load.max(1) as usize;
        for room in &mut self.rooms {
            room.load = self.rng.below(bound) as u32;
        }
        tracing::debug!(rooms = self.rooms.len(), "room loads randomized");
    }

    /// Restores the configured initial state and cancels pending completions.
    pub fn reset(&mut self) {
        let cancelled = self.pending.cancel_all();
        self.robots = self.config.robots.clone();
        self.rooms = self.config.rooms.clone();
        self.now = Quantity::new(0.0);
        tracing::info!(cancelled, "cleaning simulation reset");
    }

    /// Captures the current state.
    pub fn snapshot(&self) -> CleaningSnapshot {
        CleaningSnapshot {
            now: self.now,
            robots: self.robots.clone(),
            rooms: self.rooms.clone(),
            pending: self.pending.iter().cloned().collect(),
        }
    }

    /// Shuts the simulation down.
    ///
    /// Pending completions are cancelled before the final snapshot is taken,
    /// so robots still marked busy stay busy in it.
    pub fn teardown(mut self) -> CleaningSnapshot {
        let cancelled = self.pending.cancel_all();
        tracing::info!(cancelled, "cleaning simulation torn down");
        self.snapshot()
    }
}

impl<R: RandomSource> Simulation for CleaningSimulation<R> {
    type Outcome = TickOutcome;
    type Snapshot = CleaningSnapshot;

    fn tick(&mut self) -> TickOutcome {
        CleaningSimulation::tick(self)
    }

    fn advance_clock(&mut self, dt: Quantity<Second>) {
        CleaningSimulation::advance_clock(self, dt);
    }

    fn reset(&mut self) {
        CleaningSimulation::reset(self)
    }

    fn snapshot(&self) -> CleaningSnapshot {
        CleaningSimulation::snapshot(self)
    }
}
