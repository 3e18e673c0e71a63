//! Stochastic resolution of two players contesting the same cell.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::player::{Player, Stats};
use crate::random::RandomSource;

/// Which of the two players, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn index(&self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn other(&self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Raw-stat comparisons of the winner against the loser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Advantages {
    pub strength: bool,
    pub agility: bool,
    pub intellect: bool,
}

impl Advantages {
    /// Strict per-stat comparison of `winner` against `loser`.
    pub fn between(winner: &Stats, loser: &Stats) -> Self {
        Self {
            strength: winner.strength > loser.strength,
            agility: winner.agility > loser.agility,
            intellect: winner.intellect > loser.intellect,
        }
    }
}

/// Result of a contested move.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConflictOutcome {
    pub winner: Side,
    /// Random draws added to each player's score, in turn order.
    pub draws: [f64; 2],
    /// Combined scores (stat score + draw), in turn order.
    pub scores: [f64; 2],
    pub advantages: Advantages,
}

impl ConflictOutcome {
    pub fn loser(&self) -> Side {
        self.winner.other()
    }

    /// The winner completes its step only with an agility edge.
    pub fn winner_advances(&self) -> bool {
        self.advantages.agility
    }
}

/// Decides who wins a contested cell.
///
/// Each player gets its stat score plus a uniform draw in `[0, 1)`; the
/// second draw is resampled until it differs from the first. The first player
/// wins only with a strictly higher score.
pub fn resolve_conflict<R: RandomSource + ?Sized>(
    first: &Player,
    second: &Player,
    rng: &mut R,
) -> ConflictOutcome {
    let draw_first = rng.unit();
    let mut draw_second = rng.unit();
    while draw_second == draw_first {
        draw_second = rng.unit();
    }

    let score_first = first.stats.conflict_score() + draw_first;
    let score_second = second.stats.conflict_score() + draw_second;

    let advantages = if score_first > score_second {
        Advantages::between(&first.stats, &second.stats)
    } else if score_second > score_first {
        Advantages::between(&second.stats, &first.stats)
    } else {
        Advantages::default()
    };
    let winner = if score_first > score_second {
        Side::First
    } else {
        Side::Second
    };

    tracing::debug!(
        first = %first.name,
        second = %second.name,
        score_first,
        score_second,
        ?winner,
        agility = advantages.agility,
        "conflict resolved"
    );

    ConflictOutcome {
        winner,
        draws: [draw_first, draw_second],
        scores: [score_first, score_second],
        advantages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chase::grid::Coord;
    use crate::random::ScriptedSource;

    fn player(name: &str, stats: Stats) -> Player {
        Player::new(name, Coord::new(0, 0), stats)
    }

    #[test]
    fn higher_draw_wins_between_equals() {
        let a = player("P1", Stats::default());
        let b = player("P2", Stats::default());

        let mut rng = ScriptedSource::new(vec![0.8, 0.2]);
        let outcome = resolve_conflict(&a, &b, &mut rng);
        assert_eq!(outcome.winner, Side::First);
        assert_eq!(outcome.loser(), Side::Second);
        assert!((outcome.scores[0] - 7.3).abs() < 1e-10);
        assert!((outcome.scores[1] - 6.7).abs() < 1e-10);

        let mut rng = ScriptedSource::new(vec![0.2, 0.8]);
        assert_eq!(resolve_conflict(&a, &b, &mut rng).winner, Side::Second);
    }

    #[test]
    fn equal_stats_never_advance() {
        let a = player("P1", Stats::default());
        let b = player("P2", Stats::default());
        let mut rng = ScriptedSource::new(vec![0.9, 0.1]);
        let outcome = resolve_conflict(&a, &b, &mut rng);
        assert_eq!(outcome.advantages, Advantages::default());
        assert!(!outcome.winner_advances());
    }

    #[test]
    fn identical_draws_are_resampled() {
        let a = player("P1", Stats::default());
        let b = player("P2", Stats::default());
        let mut rng = ScriptedSource::new(vec![0.4, 0.4, 0.4, 0.7]);
        let outcome = resolve_conflict(&a, &b, &mut rng);
        assert_eq!(outcome.draws, [0.4, 0.7]);
        assert_eq!(outcome.winner, Side::Second);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn stats_dominate_small_draws() {
        let strong = player("P1", Stats::new(3, 1, 2));
        let weak = player("P2", Stats::new(1, 2, 1));
        let mut rng = ScriptedSource::new(vec![0.0, 0.99]);
        let outcome = resolve_conflict(&strong, &weak, &mut rng);
        assert_eq!(outcome.winner, Side::First);
        assert_eq!(
            outcome.advantages,
            Advantages {
                strength: true,
                agility: true,
                intellect: false,
            }
        );
        assert!(outcome.winner_advances());
    }

    #[test]
    fn advantages_are_from_winner_perspective() {
        let a = player("P1", Stats::new(1, 1, 1));
        let b = player("P2", Stats::new(1, 1, 2));
        let mut rng = ScriptedSource::new(vec![0.5, 0.1]);
        let outcome = resolve_conflict(&a, &b, &mut rng);
        assert_eq!(outcome.winner, Side::Second);
        assert!(outcome.advantages.agility);
        assert!(!outcome.advantages.strength);
    }

    #[test]
    fn exact_score_tie_goes_to_second_without_advantages() {
        // 6.5 + 0.75 == 7.0 + 0.25
        let a = player("P1", Stats::new(1, 2, 1));
        let b = player("P2", Stats::new(1, 1, 1));
        assert_eq!(a.stats.conflict_score(), 7.0);
        let mut rng = ScriptedSource::new(vec![0.25, 0.75]);
        let outcome = resolve_conflict(&a, &b, &mut rng);
        assert_eq!(outcome.scores[0], outcome.scores[1]);
        assert_eq!(outcome.winner, Side::Second);
        assert_eq!(outcome.advantages, Advantages::default());
    }
}
