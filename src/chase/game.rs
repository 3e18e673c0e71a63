//! The chase game: owned board state and the per-turn orchestration.

use std::fmt;

use rand::rngs::StdRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::config::ChaseConfig;
use super::conflict::{resolve_conflict, ConflictOutcome};
use super::error::ChaseError;
use super::grid::{Coord, Grid};
use super::movement::{detect_collision, step_toward};
use super::player::Player;
use crate::driver::Simulation;
use crate::random::{RandomSource, RngSource};

/// What happened during one turn.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TurnReport {
    /// Turn number, starting at 1.
    pub turn: u64,
    /// Cells each player tried to reach.
    pub intended: [Coord; 2],
    /// Positions after the turn.
    pub positions: [Coord; 2],
    /// Set when both players aimed for the same cell.
    pub conflict: Option<ConflictOutcome>,
}

impl TurnReport {
    pub fn collided(&self) -> bool {
        self.conflict.is_some()
    }
}

/// Read-only view of the board for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChaseSnapshot {
    pub turn: u64,
    pub size: u32,
    pub goal: Coord,
    pub obstacles: Vec<Coord>,
    pub players: [Player; 2],
}

impl ChaseSnapshot {
    fn cell_char(&self, c: Coord) -> char {
        if self.players[0].position == c {
            '1'
        } else if self.players[1].position == c {
            '2'
        } else if self.goal == c {
            'G'
        } else if self.obstacles.contains(&c) {
            '#'
        } else {
            '.'
        }
    }
}

impl fmt::Display for ChaseSnapshot {
    /// One text row per `y`, `x` left to right.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            let row: String = (0..self.size)
                .map(|x| self.cell_char(Coord::new(x, y)))
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Two players racing to a goal cell.
///
/// Each turn both players take one greedy step at once. If they aim for the
/// same cell the conflict is settled by [`resolve_conflict`]: the loser stays
/// where it was, and the winner only moves if it is the more agile of the two.
#[derive(Debug)]
pub struct ChaseGame<R: RandomSource = RngSource<StdRng>> {
    config: ChaseConfig,
    grid: Grid,
    players: [Player; 2],
    turn: u64,
    rng: R,
}

impl ChaseGame {
    /// Creates a game whose conflict draws are seeded with `seed`.
    pub fn new(config: ChaseConfig, seed: u64) -> Result<Self, ChaseError> {
        Self::with_source(config, RngSource::seeded(seed))
    }
}

impl<R: RandomSource> ChaseGame<R> {
    /// Creates a game drawing randomness from `rng`.
    ///
    /// Fails if the grid, goal, or players are malformed.
    pub fn with_source(config: ChaseConfig, rng: R) -> Result<Self, ChaseError> {
        let grid = config.build_grid()?;
        Ok(Self {
            players: config.players.clone(),
            grid,
            config,
            turn: 0,
            rng,
        })
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn goal(&self) -> Coord {
        self.config.goal
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Number of turns played since the last reset.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Players currently standing on the goal.
    pub fn players_at_goal(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.position == self.config.goal)
            .collect()
    }

    /// Plays one simultaneous turn.
    pub fn run_turn(&mut self) -> TurnReport {
        let goal = self.config.goal;
        let intended = [
            step_toward(self.players[0].position, goal, &self.grid),
            step_toward(self.players[1].position, goal, &self.grid),
        ];

        let conflict = if detect_collision(intended[0], intended[1]) {
            let outcome = resolve_conflict(&self.players[0], &self.players[1], &mut self.rng);
            if outcome.winner_advances() {
                let w = outcome.winner.index();
                self.players[w].position = intended[w];
            }
            Some(outcome)
        } else {
            for (player, next) in self.players.iter_mut().zip(intended) {
                player.position = next;
            }
            None
        };

        self.turn += 1;
        let positions = [self.players[0].position, self.players[1].position];
        tracing::debug!(
            turn = self.turn,
            p1 = %positions[0],
            p2 = %positions[1],
            collided = conflict.is_some(),
            "turn played"
        );

        TurnReport {
            turn: self.turn,
            intended,
            positions,
            conflict,
        }
    }

    /// Puts the players back on their starting cells.
    pub fn reset(&mut self) {
        self.players = self.config.players.clone();
        self.turn = 0;
        tracing::info!("chase game reset");
    }

    pub fn snapshot(&self) -> ChaseSnapshot {
        ChaseSnapshot {
            turn: self.turn,
            size: self.grid.size(),
            goal: self.config.goal,
            obstacles: self.grid.obstacles().copied().collect(),
            players: self.players.clone(),
        }
    }
}

impl<R: RandomSource> Simulation for ChaseGame<R> {
    type Outcome = TurnReport;
    type Snapshot = ChaseSnapshot;

    fn tick(&mut self) -> TurnReport {
        self.run_turn()
    }

    fn reset(&mut self) {
        ChaseGame::reset(self)
    }

    fn snapshot(&self) -> ChaseSnapshot {
        ChaseGame::snapshot(self)
    }
}
