//! Configuration for the chase game.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ChaseError;
use super::grid::{Coord, Grid};
use super::player::{Player, Stats};

/// Board layout and starting players.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChaseConfig {
    /// Side length of the square grid.
    pub size: u32,
    pub goal: Coord,
    pub obstacles: Vec<Coord>,
    /// Players in turn order.
    pub players: [Player; 2],
}

impl ChaseConfig {
    /// Builds the grid and checks that the goal and players are placeable.
    pub fn build_grid(&self) -> Result<Grid, ChaseError> {
        let grid = Grid::new(self.size, self.obstacles.iter().copied())?;
        grid.check_placement("goal", self.goal)?;
        for player in &self.players {
            player.validate()?;
            grid.check_placement(&player.name, player.position)?;
        }
        Ok(grid)
    }
}

impl Default for ChaseConfig {
    fn default() -> Self {
        // An L-shaped wall: down column 2, then along row 8.
        let mut obstacles: Vec<Coord> = (0..=8).map(|y| Coord::new(2, y)).collect();
        obstacles.extend((3..=10).map(|x| Coord::new(x, 8)));

        Self {
            size: 11,
            goal: Coord::new(10, 10),
            obstacles,
            players: [
                Player::new("P1", Coord::new(0, 0), Stats::default()),
                Player::new("P2", Coord::new(1, 0), Stats::default()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let cfg = ChaseConfig::default();
        let grid = cfg.build_grid().unwrap();
        assert_eq!(grid.size(), 11);
        assert_eq!(grid.obstacles().count(), 17);
        assert!(grid.is_obstacle(Coord::new(2, 0)));
        assert!(grid.is_obstacle(Coord::new(10, 8)));
        assert!(!grid.is_obstacle(Coord::new(2, 9)));
    }

    #[test]
    fn goal_outside_grid_rejected() {
        let cfg = ChaseConfig {
            goal: Coord::new(11, 0),
            ..ChaseConfig::default()
        };
        assert!(matches!(
            cfg.build_grid(),
            Err(ChaseError::OutOfBounds { ref subject, .. }) if subject == "goal"
        ));
    }

    #[test]
    fn player_on_obstacle_rejected() {
        let mut cfg = ChaseConfig::default();
        cfg.players[1].position = Coord::new(2, 3);
        assert_eq!(
            cfg.build_grid(),
            Err(ChaseError::InsideObstacle {
                subject: "P2".into(),
                x: 2,
                y: 3
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_deserializes_from_json() {
        let json = r#"{
            "size": 3,
            "goal": {"x": 2, "y": 2},
            "obstacles": [{"x": 1, "y": 1}],
            "players": [
                {"name": "A", "position": {"x": 0, "y": 0}, "stats": {"strength": 1, "intellect": 1, "agility": 1}},
                {"name": "B", "position": {"x": 2, "y": 0}, "stats": {"strength": 2, "intellect": 1, "agility": 3}}
            ]
        }"#;
        let cfg: ChaseConfig = serde_json::from_str(json).unwrap();
        assert!(cfg.build_grid().is_ok());
        assert_eq!(cfg.players[1].stats.agility, 3);
    }
}
