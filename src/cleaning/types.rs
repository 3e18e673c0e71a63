//! Robots, rooms, and their enumerations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a cleaning robot.
pub type RobotId = u32;

/// Whether a robot is free or working on a room.
///
/// A busy robot always names the room it is cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RobotStatus {
    Idle,
    Busy { room: String },
}

impl RobotStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, RobotStatus::Idle)
    }

    /// The room being cleaned, if any.
    pub fn room(&self) -> Option<&str> {
        match self {
            RobotStatus::Idle => None,
            RobotStatus::Busy { room } => Some(room),
        }
    }
}

impl fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RobotStatus::Idle => write!(f, "idle"),
            RobotStatus::Busy { room } => write!(f, "busy ({})", room),
        }
    }
}

/// A cleaning robot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Robot {
    pub id: RobotId,
    /// Battery level, bounded by the configured maximum.
    pub energy: u32,
    pub status: RobotStatus,
    /// Number of assignments received so far.
    pub usage_count: u32,
}

impl Robot {
    /// Creates an idle, unused robot.
    pub fn new(id: RobotId, energy: u32) -> Self {
        Self {
            id,
            energy,
            status: RobotStatus::Idle,
            usage_count: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status.is_idle()
    }

    /// The room being cleaned, if any.
    pub fn room(&self) -> Option<&str> {
        self.status.room()
    }
}

/// Size class of a room. Each class has a fixed energy cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoomSize {
    Small,
    Medium,
    Large,
}

impl RoomSize {
    /// Returns all size classes in order.
    pub fn all() -> [RoomSize; 3] {
        [RoomSize::Small, RoomSize::Medium, RoomSize::Large]
    }

    /// Returns the index of this size (0=Small, 1=Medium, 2=Large).
    pub fn index(&self) -> usize {
        match self {
            RoomSize::Small => 0,
            RoomSize::Medium => 1,
            RoomSize::Large => 2,
        }
    }

    /// Default energy spent cleaning a room of this size.
    ///
    /// Actual costs are configured via [`super::config::CleaningConfig`].
    pub fn default_cost(&self) -> u32 {
        match self {
            RoomSize::Small => 5,
            RoomSize::Medium => 10,
            RoomSize::Large => 15,
        }
    }
}

impl fmt::Display for RoomSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomSize::Small => write!(f, "small"),
            RoomSize::Medium => write!(f, "medium"),
            RoomSize::Large => write!(f, "large"),
        }
    }
}

/// A room waiting to be cleaned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    /// Unique key.
    pub name: String,
    pub size: RoomSize,
    /// Accumulated dirt level.
    pub load: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, size: RoomSize, load: u32) -> Self {
        Self {
            name: name.into(),
            size,
            load,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_costs_are_ordered() {
        assert!(RoomSize::Small.default_cost() < RoomSize::Medium.default_cost());
        assert!(RoomSize::Medium.default_cost() < RoomSize::Large.default_cost());
    }

    #[test]
    fn room_size_indices_follow_all() {
        for (i, size) in RoomSize::all().iter().enumerate() {
            assert_eq!(size.index(), i);
        }
    }

    #[test]
    fn busy_status_carries_room() {
        let mut robot = Robot::new(1, 70);
        assert!(robot.is_idle());
        assert_eq!(robot.room(), None);

        robot.status = RobotStatus::Busy {
            room: "Bedroom".into(),
        };
        assert!(!robot.is_idle());
        assert_eq!(robot.room(), Some("Bedroom"));
    }

    #[test]
    fn status_display() {
        assert_eq!(RobotStatus::Idle.to_string(), "idle");
        let busy = RobotStatus::Busy {
            room: "Bathroom".into(),
        };
        assert_eq!(busy.to_string(), "busy (Bathroom)");
    }
}
