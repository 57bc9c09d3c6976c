use std::fmt;

use oxiplat_sim::RunSummary;
use serde::{Deserialize, Serialize};

/// Computes a scalar fitness from a run summary.
///
/// Implementations define what "good play" means. The genetic algorithm only
/// ever sees the scalar; two scorers with different weightings evolve agents
/// with different priorities from the same simulator.
pub trait ScoreRunSummary: fmt::Debug + Send + Sync {
    /// Scores one run. Higher is better.
    fn score(&self, summary: &RunSummary) -> f32;
}

/// Weighting constants for [`ShapedFitness`].
///
/// All weights are static configuration: they are chosen up front and never
/// derived at runtime. `validate` is the startup gate — a bad weight set must
/// never reach the evolution loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight of the (tiered) completion fraction. Dominant term.
    pub completion: f32,
    /// Weight of each remaining budget tick, counted only on a win.
    pub time_bonus: f32,
    /// Weight per kill.
    pub kill: f32,
    /// Weight per collected mushroom.
    pub mushroom: f32,
    /// Weight per collected coin.
    pub coin: f32,
    /// Penalty per hit taken.
    pub hit_penalty: f32,
    /// Multiplier applied to the whole fitness on a win.
    pub win_multiplier: f32,
    /// Multiplier applied to the whole fitness on anything but a win.
    pub loss_multiplier: f32,
    /// Completion fraction above which the mid tier multiplier applies.
    pub tier_mid: f32,
    /// Multiplier for the completion term in the mid tier.
    pub tier_mid_multiplier: f32,
    /// Completion fraction above which the high tier multiplier applies.
    pub tier_high: f32,
    /// Multiplier for the completion term in the high tier.
    pub tier_high_multiplier: f32,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            completion: 4000.0,
            time_bonus: 0.5,
            kill: 1.5,
            mushroom: 1.5,
            coin: 1.25,
            hit_penalty: 3.0,
            win_multiplier: 2.0,
            loss_multiplier: 0.5,
            tier_mid: 0.5,
            tier_mid_multiplier: 1.25,
            tier_high: 0.7,
            tier_high_multiplier: 1.5,
        }
    }
}

impl FitnessWeights {
    /// Validates the weight set. Called once at startup; failure is fatal.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let positive = [
            ("completion", self.completion),
            ("time_bonus", self.time_bonus),
            ("kill", self.kill),
            ("mushroom", self.mushroom),
            ("coin", self.coin),
            ("hit_penalty", self.hit_penalty),
            ("win_multiplier", self.win_multiplier),
            ("loss_multiplier", self.loss_multiplier),
            ("tier_mid_multiplier", self.tier_mid_multiplier),
            ("tier_high_multiplier", self.tier_high_multiplier),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(WeightsError::NotPositive { name, value });
            }
        }
        for (name, value) in [("tier_mid", self.tier_mid), ("tier_high", self.tier_high)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WeightsError::TierOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Errors from [`FitnessWeights::validate`].
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum WeightsError {
    #[display("fitness weight {name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[display("completion tier {name} must be in [0, 1], got {value}")]
    TierOutOfRange { name: &'static str, value: f32 },
}

/// The default fitness shaping.
///
/// ```text
/// fitness = w_completion · tiered(completion)
///         + w_time · remaining_ticks        (wins only)
///         + w_kill · kills
///         + w_mushroom · mushrooms
///         + w_coin · coins
///         - w_hit · hits_taken
/// fitness ×= win_multiplier on a win, loss_multiplier otherwise
/// ```
///
/// `tiered` scales the completion fraction up once it passes the mid and high
/// thresholds, so late-course progress is worth non-linearly more than early
/// progress — a population stuck at 40 % completion gains little from shuffling
/// its early ticks, but any chromosome that pushes past an obstacle near the
/// end of the course gets a decisive edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapedFitness {
    weights: FitnessWeights,
}

impl ShapedFitness {
    /// Creates a scorer from an already-validated weight set.
    #[must_use]
    pub const fn new(weights: FitnessWeights) -> Self {
        Self { weights }
    }

    /// The weight set in use.
    #[must_use]
    pub const fn weights(&self) -> &FitnessWeights {
        &self.weights
    }

    fn tiered_completion(&self, completion: f32) -> f32 {
        let w = &self.weights;
        if completion > w.tier_high {
            completion * w.tier_high_multiplier
        } else if completion > w.tier_mid {
            completion * w.tier_mid_multiplier
        } else {
            completion
        }
    }
}

#[expect(clippy::cast_precision_loss)]
impl ScoreRunSummary for ShapedFitness {
    fn score(&self, summary: &RunSummary) -> f32 {
        let w = &self.weights;
        let won = summary.status().is_win();

        let mut fitness = w.completion * self.tiered_completion(summary.completion())
            + w.kill * summary.kills().total() as f32
            + w.mushroom * summary.mushrooms() as f32
            + w.coin * summary.coins() as f32
            - w.hit_penalty * summary.hits_taken() as f32;
        if won {
            fitness += w.time_bonus * summary.remaining_ticks() as f32;
            fitness * w.win_multiplier
        } else {
            fitness * w.loss_multiplier
        }
    }
}

#[cfg(test)]
mod tests {
    use oxiplat_sim::{KillBreakdown, TerminalStatus};

    use super::*;

    fn summary(
        status: TerminalStatus,
        completion: f32,
        remaining_ticks: usize,
        kills: u32,
        hits: u32,
        coins: u32,
        mushrooms: u32,
    ) -> RunSummary {
        RunSummary::new(
            status,
            completion,
            remaining_ticks,
            KillBreakdown {
                stomp: kills,
                ..KillBreakdown::default()
            },
            hits,
            coins,
            mushrooms,
            0,
        )
    }

    fn scorer() -> ShapedFitness {
        ShapedFitness::default()
    }

    #[test]
    fn test_default_weights_are_valid() {
        assert!(FitnessWeights::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_weight() {
        let weights = FitnessWeights {
            completion: 0.0,
            ..FitnessWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(WeightsError::NotPositive {
                name: "completion",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_tier_out_of_range() {
        let weights = FitnessWeights {
            tier_high: 1.5,
            ..FitnessWeights::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(WeightsError::TierOutOfRange {
                name: "tier_high",
                ..
            })
        ));
    }

    #[test]
    fn test_low_completion_is_not_tier_scaled() {
        let s = summary(TerminalStatus::TimeOut, 0.4, 0, 0, 0, 0, 0);
        let expected = 4000.0 * 0.4 * 0.5;
        assert!((scorer().score(&s) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_mid_tier_scales_completion() {
        let s = summary(TerminalStatus::TimeOut, 0.6, 0, 0, 0, 0, 0);
        let expected = 4000.0 * 0.6 * 1.25 * 0.5;
        assert!((scorer().score(&s) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_high_tier_scales_completion_further() {
        let s = summary(TerminalStatus::TimeOut, 0.8, 0, 0, 0, 0, 0);
        let expected = 4000.0 * 0.8 * 1.5 * 0.5;
        assert!((scorer().score(&s) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_win_doubles_and_adds_time_bonus() {
        let s = summary(TerminalStatus::Win, 1.0, 100, 0, 0, 0, 0);
        let expected = (4000.0 * 1.5 + 0.5 * 100.0) * 2.0;
        assert!((scorer().score(&s) - expected).abs() < 1e-3);
    }

    #[test]
    fn test_remaining_time_is_ignored_without_a_win() {
        let with_time = summary(TerminalStatus::Lose, 0.3, 500, 0, 0, 0, 0);
        let without_time = summary(TerminalStatus::Lose, 0.3, 0, 0, 0, 0, 0);
        assert_eq!(scorer().score(&with_time), scorer().score(&without_time));
    }

    #[test]
    fn test_hits_reduce_fitness() {
        let clean = summary(TerminalStatus::TimeOut, 0.3, 0, 0, 0, 0, 0);
        let hurt = summary(TerminalStatus::TimeOut, 0.3, 0, 0, 2, 0, 0);
        assert!(scorer().score(&hurt) < scorer().score(&clean));
        assert!((scorer().score(&clean) - scorer().score(&hurt) - 2.0 * 3.0 * 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_collectibles_and_kills_add_fitness() {
        let base = summary(TerminalStatus::TimeOut, 0.3, 0, 0, 0, 0, 0);
        let rich = summary(TerminalStatus::TimeOut, 0.3, 0, 2, 0, 4, 1);
        let expected_delta = (2.0 * 1.5 + 4.0 * 1.25 + 1.0 * 1.5) * 0.5;
        assert!((scorer().score(&rich) - scorer().score(&base) - expected_delta).abs() < 1e-3);
    }

    #[test]
    fn test_faster_win_scores_higher() {
        let slow = summary(TerminalStatus::Win, 1.0, 10, 0, 0, 0, 0);
        let fast = summary(TerminalStatus::Win, 1.0, 200, 0, 0, 0, 0);
        assert!(scorer().score(&fast) > scorer().score(&slow));
    }
}
