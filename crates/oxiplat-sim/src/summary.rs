use serde::{Deserialize, Serialize};

/// How a simulated run ended.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::IsVariant,
    Serialize,
    Deserialize,
)]
pub enum TerminalStatus {
    /// The run was cut off while still in progress.
    #[display("RUNNING")]
    Running,
    /// The goal was reached within the tick budget.
    #[display("WIN")]
    Win,
    /// The player died.
    #[display("LOSE")]
    Lose,
    /// The tick budget ran out before the goal.
    #[display("TIME_OUT")]
    TimeOut,
}

/// Kill counters split by method.
///
/// The synthetic oracle only produces stomp and fire kills; the breakdown
/// carries all four methods so summaries from a full game engine fit the same
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KillBreakdown {
    pub stomp: u32,
    pub fire: u32,
    pub shell: u32,
    pub fall: u32,
}

impl KillBreakdown {
    /// Total kills across all methods.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.stomp + self.fire + self.shell + self.fall
    }
}

/// The structured outcome of simulating one input sequence.
///
/// A summary is immutable once returned by an oracle: the fitness evaluator
/// only reads it, and the chromosome that produced it replaces its cached copy
/// wholesale on re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    status: TerminalStatus,
    completion: f32,
    remaining_ticks: usize,
    kills: KillBreakdown,
    hits_taken: u32,
    coins: u32,
    mushrooms: u32,
    fire_flowers: u32,
}

impl RunSummary {
    /// Creates a run summary. `completion` is clamped to `[0, 1]`.
    #[expect(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        status: TerminalStatus,
        completion: f32,
        remaining_ticks: usize,
        kills: KillBreakdown,
        hits_taken: u32,
        coins: u32,
        mushrooms: u32,
        fire_flowers: u32,
    ) -> Self {
        Self {
            status,
            completion: completion.clamp(0.0, 1.0),
            remaining_ticks,
            kills,
            hits_taken,
            coins,
            mushrooms,
            fire_flowers,
        }
    }

    /// How the run ended.
    #[must_use]
    pub const fn status(&self) -> TerminalStatus {
        self.status
    }

    /// Fraction of the course covered, in `[0, 1]`.
    #[must_use]
    pub const fn completion(&self) -> f32 {
        self.completion
    }

    /// Ticks left in the budget when the run ended.
    #[must_use]
    pub const fn remaining_ticks(&self) -> usize {
        self.remaining_ticks
    }

    /// Kill counters.
    #[must_use]
    pub const fn kills(&self) -> KillBreakdown {
        self.kills
    }

    /// Number of times the player was hurt.
    #[must_use]
    pub const fn hits_taken(&self) -> u32 {
        self.hits_taken
    }

    /// Coins collected.
    #[must_use]
    pub const fn coins(&self) -> u32 {
        self.coins
    }

    /// Mushrooms collected.
    #[must_use]
    pub const fn mushrooms(&self) -> u32 {
        self.mushrooms
    }

    /// Fire flowers collected.
    #[must_use]
    pub const fn fire_flowers(&self) -> u32 {
        self.fire_flowers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_is_clamped() {
        let summary = RunSummary::new(
            TerminalStatus::Win,
            1.7,
            10,
            KillBreakdown::default(),
            0,
            0,
            0,
            0,
        );
        assert_eq!(summary.completion(), 1.0);
    }

    #[test]
    fn test_kill_breakdown_total() {
        let kills = KillBreakdown {
            stomp: 2,
            fire: 1,
            shell: 0,
            fall: 3,
        };
        assert_eq!(kills.total(), 6);
    }

    #[test]
    fn test_status_display_matches_stats_sink_format() {
        assert_eq!(TerminalStatus::Win.to_string(), "WIN");
        assert_eq!(TerminalStatus::Lose.to_string(), "LOSE");
        assert_eq!(TerminalStatus::TimeOut.to_string(), "TIME_OUT");
        assert_eq!(TerminalStatus::Running.to_string(), "RUNNING");
    }
}
