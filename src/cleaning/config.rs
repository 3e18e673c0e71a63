//! Configuration for the cleaning simulation.

use std::collections::{HashMap, HashSet};

use qtty::{Quantity, Second};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::CleaningError;
use super::types::{Robot, Room, RoomSize};

/// Configuration for the cleaning simulation.
///
/// Holds the tunables of the assignment rules together with the initial
/// robots and rooms that a reset restores.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CleaningConfig {
    // --- Robot energy ---
    /// Upper bound on robot energy.
    pub max_energy: u32,
    /// Energy added by one recharge.
    pub recharge_amount: u32,

    // --- Rooms ---
    /// Energy spent per size class.
    pub costs: HashMap<RoomSize, u32>,
    /// Upper bound on room load (randomized loads fall in `0..max_load`).
    pub max_load: u32,

    // --- Timing ---
    /// Delay between assignment and completion.
    pub completion_delay: Quantity<Second>,

    // --- Initial state ---
    pub robots: Vec<Robot>,
    pub rooms: Vec<Room>,
}

impl CleaningConfig {
    /// Returns the energy cost for a given room size.
    pub fn cost_for(&self, size: RoomSize) -> u32 {
        self.costs
            .get(&size)
            .copied()
            .unwrap_or_else(|| size.default_cost())
    }

    /// Checks that the initial state respects the entity invariants.
    pub fn validate(&self) -> Result<(), CleaningError> {
        let mut ids = HashSet::new();
        for robot in &self.robots {
            if !ids.insert(robot.id) {
                return Err(CleaningError::DuplicateRobot(robot.id));
            }
            if robot.energy > self.max_energy {
                return Err(CleaningError::EnergyAboveMaximum {
                    robot: robot.id,
                    energy: robot.energy,
                    max: self.max_energy,
                });
            }
        }

        let mut names = HashSet::new();
        for room in &self.rooms {
            if !names.insert(room.name.as_str()) {
                return Err(CleaningError::DuplicateRoom(room.name.clone()));
            }
            if room.load > self.max_load {
                return Err(CleaningError::LoadAboveMaximum {
                    room: room.name.clone(),
                    load: room.load,
                    max: self.max_load,
                });
            }
        }

        // Only an assignment schedules a completion, so a robot that starts
        // busy would never become idle again.
        if let Some(robot) = self.robots.iter().find(|r| !r.is_idle()) {
            return Err(CleaningError::StartsBusy(robot.id));
        }
        Ok(())
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        let mut costs = HashMap::new();
        for size in RoomSize::all() {
            costs.insert(size, size.default_cost());
        }

        Self {
            max_energy: 100,
            recharge_amount: 30,
            costs,
            max_load: 100,
            completion_delay: Quantity::new(5.0),
            robots: vec![Robot::new(1, 70), Robot::new(2, 50)],
            rooms: vec![
                Room::new("Bathroom", RoomSize::Small, 20),
                Room::new("Bedroom", RoomSize::Medium, 50),
                Room::new("Living Room", RoomSize::Large, 75),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::types::RobotStatus;

    #[test]
    fn default_config_is_valid() {
        let cfg = CleaningConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_energy, 100);
        assert_eq!(cfg.recharge_amount, 30);
        assert_eq!(cfg.completion_delay.value(), 5.0);
    }

    #[test]
    fn cost_for_known_sizes() {
        let cfg = CleaningConfig::default();
        assert_eq!(cfg.cost_for(RoomSize::Small), 5);
        assert_eq!(cfg.cost_for(RoomSize::Medium), 10);
        assert_eq!(cfg.cost_for(RoomSize::Large), 15);
    }

    #[test]
    fn cost_for_falls_back_to_default() {
        let cfg = CleaningConfig {
            costs: HashMap::new(),
            ..CleaningConfig::default()
        };
        assert_eq!(cfg.cost_for(RoomSize::Large), 15);
    }

    #[test]
    fn duplicate_robot_rejected() {
        let cfg = CleaningConfig {
            robots: vec![Robot::new(1, 10), Robot::new(1, 20)],
            ..CleaningConfig::default()
        };
        assert_eq!(cfg.validate(), Err(CleaningError::DuplicateRobot(1)));
    }

    #[test]
    fn duplicate_room_rejected() {
        let cfg = CleaningConfig {
            rooms: vec![
                Room::new("Hall", RoomSize::Small, 0),
                Room::new("Hall", RoomSize::Large, 0),
            ],
            ..CleaningConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(CleaningError::DuplicateRoom("Hall".into()))
        );
    }

    #[test]
    fn energy_above_maximum_rejected() {
        let cfg = CleaningConfig {
            robots: vec![Robot::new(3, 101)],
            ..CleaningConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CleaningError::EnergyAboveMaximum { robot: 3, .. })
        ));
    }

    #[test]
    fn busy_initial_robot_rejected() {
        let cfg = CleaningConfig {
            robots: vec![
                Robot::new(1, 70),
                Robot {
                    status: RobotStatus::Busy {
                        room: "Bedroom".into(),
                    },
                    ..Robot::new(2, 50)
                },
            ],
            ..CleaningConfig::default()
        };
        assert_eq!(cfg.validate(), Err(CleaningError::StartsBusy(2)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_round_trips_through_json() {
        let cfg = CleaningConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: CleaningConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.robots, cfg.robots);
        assert_eq!(back.rooms, cfg.rooms);
        assert_eq!(back.cost_for(RoomSize::Medium), 10);
    }
}
