//! Assignment rules: which robot cleans which room, and what cleaning does.
//!
//! These functions are the whole decision logic of the cleaning simulation.
//! [`super::CleaningSimulation`] owns the state and calls them in order.

use qtty::{Quantity, Second};

use super::config::CleaningConfig;
use super::error::CleaningError;
use super::timers::{CompletionHandle, PendingCompletion, PendingCompletions};
use super::types::{Robot, RobotId, RobotStatus, Room, RoomSize};
use crate::random::RandomSource;

/// Picks the robot that should take the next room.
///
/// Candidates are idle robots with energy left. The highest energy wins;
/// energy ties go to the least used robot, and remaining ties to the one
/// listed first.
pub fn select_robot(robots: &[Robot]) -> Option<&Robot> {
    robots
        .iter()
        .filter(|r| r.is_idle() && r.energy > 0)
        .fold(None, |best: Option<&Robot>, current| match best {
            None => Some(current),
            Some(prev) => {
                if prev.energy > current.energy {
                    Some(prev)
                } else if prev.energy < current.energy {
                    Some(current)
                } else if prev.usage_count <= current.usage_count {
                    Some(prev)
                } else {
                    Some(current)
                }
            }
        })
}

/// Picks the room `robot` should clean.
///
/// Candidates are rooms nobody is cleaning whose cost the robot can afford.
/// The dirtiest candidate wins. When every candidate has the same load, the
/// pick is uniform at random.
pub fn select_room<'a, R: RandomSource + ?Sized>(
    rooms: &'a [Room],
    robots: &[Robot],
    robot: &Robot,
    config: &CleaningConfig,
    rng: &mut R,
) -> Option<&'a Room> {
    let mut candidates: Vec<&Room> = rooms
        .iter()
        .filter(|room| {
            let taken = robots.iter().any(|r| r.room() == Some(room.name.as_str()));
            !taken && config.cost_for(room.size) <= robot.energy
        })
        .collect();

    // Stable: equal loads keep their original order.
    candidates.sort_by(|a, b| b.load.cmp(&a.load));

    let first = *candidates.first()?;
    let last = *candidates.last()?;
    if candidates.len() > 1 && first.load == last.load {
        let pick = rng.below(candidates.len());
        tracing::trace!(
            candidates = candidates.len(),
            load = first.load,
            pick,
            "room tie broken at random"
        );
        return Some(candidates[pick]);
    }
    Some(first)
}

/// Marks `robot` as cleaning `room` and schedules the completion.
///
/// Any completion already pending for the robot is cancelled and replaced.
pub fn assign(
    robot: &mut Robot,
    room: &Room,
    pending: &mut PendingCompletions,
    now: Quantity<Second>,
    delay: Quantity<Second>,
) -> CompletionHandle {
    robot.status = RobotStatus::Busy {
        room: room.name.clone(),
    };
    robot.usage_count += 1;

    let handle = CompletionHandle::generate();
    pending.schedule(PendingCompletion {
        handle,
        robot: robot.id,
        room: room.name.clone(),
        size: room.size,
        due: now + delay,
    });

    tracing::debug!(
        robot = robot.id,
        room = %room.name,
        size = %room.size,
        usage = robot.usage_count,
        %handle,
        "robot assigned"
    );
    handle
}

/// Applies a finished cleaning: the robot pays the room's cost and goes idle,
/// the room becomes clean.
pub fn complete_assignment(
    robots: &mut [Robot],
    rooms: &mut [Room],
    robot_id: RobotId,
    room_name: &str,
    size: RoomSize,
    config: &CleaningConfig,
) -> Result<(), CleaningError> {
    let robot_idx = robots
        .iter()
        .position(|r| r.id == robot_id)
        .ok_or(CleaningError::UnknownRobot(robot_id))?;
    let room_idx = rooms
        .iter()
        .position(|r| r.name == room_name)
        .ok_or_else(|| CleaningError::UnknownRoom(room_name.to_string()))?;

    let robot = &mut robots[robot_idx];
    robot.energy = robot.energy.saturating_sub(config.cost_for(size));
    robot.status = RobotStatus::Idle;
    rooms[room_idx].load = 0;

    tracing::debug!(
        robot = robot_id,
        room = room_name,
        energy = robot.energy,
        "cleaning completed"
    );
    Ok(())
}

/// Adds one recharge worth of energy, capped at the maximum.
///
/// Busy robots cannot be recharged. Returns the new energy level.
pub fn recharge_robot(robot: &mut Robot, config: &CleaningConfig) -> Result<u32, CleaningError> {
    if !robot.is_idle() {
        return Err(CleaningError::RobotBusy(robot.id));
    }
    robot.energy = robot
        .energy
        .saturating_add(config.recharge_amount)
        .min(config.max_energy);
    tracing::debug!(robot = robot.id, energy = robot.energy, "robot recharged");
    Ok(robot.energy)
}
