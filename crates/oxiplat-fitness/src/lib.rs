//! Fitness shaping: turning run summaries into scalar objectives.
//!
//! This crate sits between the simulation oracle and the genetic algorithm.
//! It owns two things:
//!
//! - [`ShapedFitness`]: the weighted, tiered combination of raw simulation
//!   outcomes (completion, remaining time, kills, collectibles, hits) into a
//!   single scalar, behind the [`ScoreRunSummary`] trait
//! - [`FitnessEvaluator`]: the component that drives one oracle call per
//!   chromosome and pairs the resulting summary with its score
//!
//! The fitness function defines what the search learns. The default weights
//! make course completion dominate everything else by an order of magnitude,
//! with remaining time rewarded only on a win, so the population is pulled
//! toward finishing first and polishing speed second.

pub use self::{evaluator::*, shaping::*};

pub mod evaluator;
pub mod shaping;
