use thiserror::Error;

use super::types::RobotId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CleaningError {
    #[error("Robot {0} does not exist")]
    UnknownRobot(RobotId),

    #[error("Room '{0}' does not exist")]
    UnknownRoom(String),

    #[error("Robot {0} is busy and cannot be recharged")]
    RobotBusy(RobotId),

    #[error("Robot ID already exists: {0}")]
    DuplicateRobot(RobotId),

    #[error("Room name already exists: {0}")]
    DuplicateRoom(String),

    #[error("Robot {robot} starts with energy {energy}, above the maximum of {max}")]
    EnergyAboveMaximum { robot: RobotId, energy: u32, max: u32 },

    #[error("Robot {0} starts busy; initial robots must be idle")]
    StartsBusy(RobotId),

    #[error("Room '{room}' starts with load {load}, above the maximum of {max}")]
    LoadAboveMaximum { room: String, load: u32, max: u32 },
}
