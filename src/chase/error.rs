use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChaseError {
    #[error("Grid must have at least one cell")]
    EmptyGrid,

    #[error("Obstacle at ({x}, {y}) lies outside the {size}x{size} grid")]
    ObstacleOutOfBounds { x: u32, y: u32, size: u32 },

    #[error("{subject} at ({x}, {y}) lies outside the {size}x{size} grid")]
    OutOfBounds {
        subject: String,
        x: u32,
        y: u32,
        size: u32,
    },

    #[error("{subject} at ({x}, {y}) is inside an obstacle")]
    InsideObstacle { subject: String, x: u32, y: u32 },

    #[error("Player '{player}' has a zero {stat} stat")]
    InvalidStat { player: String, stat: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_display() {
        let e = ChaseError::OutOfBounds {
            subject: "goal".into(),
            x: 11,
            y: 3,
            size: 11,
        };
        assert_eq!(e.to_string(), "goal at (11, 3) lies outside the 11x11 grid");
    }

    #[test]
    fn invalid_stat_display() {
        let e = ChaseError::InvalidStat {
            player: "P2".into(),
            stat: "agility",
        };
        assert_eq!(e.to_string(), "Player 'P2' has a zero agility stat");
    }
}
