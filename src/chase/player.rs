//! Players and their stats.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ChaseError;
use super::grid::Coord;

/// Raw stats that decide conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stats {
    pub strength: u32,
    pub intellect: u32,
    pub agility: u32,
}

impl Stats {
    pub fn new(strength: u32, intellect: u32, agility: u32) -> Self {
        Self {
            strength,
            intellect,
            agility,
        }
    }

    /// Deterministic part of a conflict score.
    ///
    /// ```text
    /// score = agility × 2 + strength × 4 + intellect × 0.5
    /// ```
    pub fn conflict_score(&self) -> f64 {
        self.agility as f64 * 2.0 + self.strength as f64 * 4.0 + self.intellect as f64 * 0.5
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// A player chasing the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    pub name: String,
    pub position: Coord,
    pub stats: Stats,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Coord, stats: Stats) -> Self {
        Self {
            name: name.into(),
            position,
            stats,
        }
    }

    /// Stats must all be positive.
    pub fn validate(&self) -> Result<(), ChaseError> {
        let zero = [
            ("strength", self.stats.strength),
            ("intellect", self.stats.intellect),
            ("agility", self.stats.agility),
        ]
        .into_iter()
        .find(|(_, v)| *v == 0);

        match zero {
            Some((stat, _)) => Err(ChaseError::InvalidStat {
                player: self.name.clone(),
                stat,
            }),
            None => Ok(()),
        }
    }
}
