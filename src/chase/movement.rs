//! Greedy single-step pathing.
//!
//! Players never plan: each turn they try the x axis first, then the y axis,
//! and take the first open step that brings them closer to the goal.

use super::grid::{Coord, Direction, Grid};

/// Chooses the step a player at `position` takes toward `goal`.
///
/// Priority is fixed: right, left, down, up. Returns `None` when every
/// useful direction is blocked or the player is already on the goal.
pub fn next_direction(position: Coord, goal: Coord, grid: &Grid) -> Option<Direction> {
    if goal.x > position.x && grid.can_step(position, Direction::Right) {
        return Some(Direction::Right);
    }
    if goal.x < position.x && grid.can_step(position, Direction::Left) {
        return Some(Direction::Left);
    }
    if goal.y > position.y && grid.can_step(position, Direction::Down) {
        return Some(Direction::Down);
    }
    if goal.y < position.y && grid.can_step(position, Direction::Up) {
        return Some(Direction::Up);
    }
    None
}

/// The cell a player at `position` moves to this turn.
pub fn step_toward(position: Coord, goal: Coord, grid: &Grid) -> Coord {
    debug_assert!(grid.is_open(position), "player outside the open grid: {}", position);
    next_direction(position, goal, grid)
        .and_then(|dir| dir.neighbour(position))
        .unwrap_or(position)
}

/// Two players collide when they are headed for the same cell.
pub fn detect_collision(a: Coord, b: Coord) -> bool {
    a == b
}
