//! Deferred completions, one per robot.
//!
//! An assignment does not take effect immediately: it schedules a completion
//! that fires once the simulation clock reaches its due time. Each robot has
//! at most one pending completion; scheduling a new one replaces the old.

use std::collections::BTreeMap;
use std::fmt;

use qtty::{Quantity, Second};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{RobotId, RoomSize};
use crate::driver::TIME_EPSILON;

/// Opaque handle identifying one scheduled completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompletionHandle(Uuid);

impl CompletionHandle {
    /// Generates a new unique handle (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CompletionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A completion waiting for its due time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PendingCompletion {
    pub handle: CompletionHandle,
    pub robot: RobotId,
    pub room: String,
    /// Size captured at assignment time; its cost is applied on completion.
    pub size: RoomSize,
    pub due: Quantity<Second>,
}

/// Table of pending completions keyed by robot.
#[derive(Debug, Clone, Default)]
pub struct PendingCompletions {
    by_robot: BTreeMap<RobotId, PendingCompletion>,
}

impl PendingCompletions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_robot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_robot.is_empty()
    }

    /// Returns the pending completion for a robot, if any.
    pub fn get(&self, robot: RobotId) -> Option<&PendingCompletion> {
        self.by_robot.get(&robot)
    }

    /// Iterates pending completions in robot order.
    pub fn iter(&self) -> impl Iterator<Item = &PendingCompletion> {
        self.by_robot.values()
    }

    /// Schedules a completion, returning the one it replaced.
    pub fn schedule(&mut self, pending: PendingCompletion) -> Option<PendingCompletion> {
        let replaced = self.by_robot.insert(pending.robot, pending);
        if let Some(old) = &replaced {
            tracing::debug!(
                robot = old.robot,
                handle = %old.handle,
                room = %old.room,
                "pending completion replaced"
            );
        }
        replaced
    }

    /// Cancels the pending completion for a robot.
    pub fn cancel(&mut self, robot: RobotId) -> Option<PendingCompletion> {
        self.by_robot.remove(&robot)
    }

    /// Cancels everything. Returns how many completions were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.by_robot.len();
        self.by_robot.clear();
        n
    }

    /// Removes and returns every completion due at or before `now`.
    ///
    /// Due times within `TIME_EPSILON` of `now` count as reached, since
    /// `now` is usually a sum of many frame deltas. Results are ordered by due time, ties by robot id.
    pub fn drain_due(&mut self, now: Quantity<Second>) -> Vec<PendingCompletion> {
        let due_robots: Vec<RobotId> = self
            .by_robot
            .values()
            .filter(|p| p.due.value() <= now.value() + TIME_EPSILON)
            .map(|p| p.robot)
            .collect();

        let mut due: Vec<PendingCompletion> = due_robots
            .into_iter()
            .filter_map(|id| self.by_robot.remove(&id))
            .collect();
        due.sort_by(|a, b| {
            a.due
                .value()
                .total_cmp(&b.due.value())
                .then(a.robot.cmp(&b.robot))
        });
        due
    }

    /// Time left before a robot's completion fires, floored at zero.
    pub fn remaining(&self, robot: RobotId, now: Quantity<Second>) -> Option<Quantity<Second>> {
        self.by_robot
            .get(&robot)
            .map(|p| Quantity::new((p.due.value() - now.value()).max(0.0)))
    }
}
