//! Candidate solutions: fixed-length control-vector sequences.
//!
//! # Initialization policy
//!
//! [`Chromosome::random`] does not draw uniform noise. Each channel starts
//! true with a low base probability, then three corrections are applied:
//!
//! - opposite horizontal directions are mutually exclusive — if both are set,
//!   one is cleared at random
//! - ticks with no horizontal nor jump input are biased toward moving
//!   forward
//! - occasionally a multi-tick jump burst (jump + speed + forward held for
//!   5–7 ticks) is injected and the randomizer skips past it, so the burst
//!   survives the same initialization pass
//!
//! The result is a population that can already run and jump, which is what
//! lets the search reach obstacles at all.

use oxiplat_sim::{ControlChannel, ControlVector, RunSummary};
use rand::Rng;

use crate::operators;

/// Base probability for each channel on each tick.
const BASE_CHANNEL_RATE: f64 = 0.2;
/// Probability of forcing forward motion on an otherwise idle tick.
const FORWARD_BIAS: f64 = 0.7;
/// Probability of injecting a jump burst at a given cursor position.
const JUMP_BURST_RATE: f64 = 0.2;
/// Jump burst duration range, in ticks.
const JUMP_BURST_MIN: usize = 5;
const JUMP_BURST_MAX: usize = 7;

/// One candidate solution: a fixed-length input sequence plus its cached
/// evaluation.
///
/// The sequence length is fixed at construction and never changes; the
/// genetic operators flip or replace per-tick vectors but never resize.
/// Fitness and the run summary are caches owned by this chromosome alone,
/// replaced wholesale on re-evaluation. Cloning produces a fully independent
/// deep copy — the elite slot and parent copies rely on this.
#[derive(Debug, Clone)]
pub struct Chromosome {
    inputs: Vec<ControlVector>,
    fitness: f32,
    summary: Option<RunSummary>,
}

impl Chromosome {
    /// Fitness of a chromosome that has not been evaluated yet. Any real
    /// evaluation scores strictly above this.
    pub const UNEVALUATED_FITNESS: f32 = f32::MIN;

    /// Wraps an explicit input sequence into an unevaluated chromosome.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` is empty.
    #[must_use]
    pub fn from_inputs(inputs: Vec<ControlVector>) -> Self {
        assert!(!inputs.is_empty(), "chromosome sequence must be non-empty");
        Self {
            inputs,
            fitness: Self::UNEVALUATED_FITNESS,
            summary: None,
        }
    }

    /// Generates a random chromosome of the given length with the
    /// forward-motion and jump-burst prior described in the module docs.
    ///
    /// Always succeeds for `length >= 1`.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    #[must_use]
    pub fn random<R>(rng: &mut R, length: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(length > 0, "chromosome sequence must be non-empty");
        let mut inputs = vec![ControlVector::EMPTY; length];
        let mut tick = 0;
        while tick < length {
            let vector = &mut inputs[tick];
            for channel in ControlChannel::ALL {
                vector.set(channel, rng.random_bool(BASE_CHANNEL_RATE));
            }

            // Opposite directions cancel each other in the simulator; keep one.
            if vector.get(ControlChannel::Left) && vector.get(ControlChannel::Right) {
                let cleared = if rng.random_bool(0.5) {
                    ControlChannel::Left
                } else {
                    ControlChannel::Right
                };
                vector.set(cleared, false);
            }

            if !vector.get(ControlChannel::Left)
                && !vector.get(ControlChannel::Right)
                && !vector.get(ControlChannel::Jump)
            {
                vector.set(ControlChannel::Right, rng.random_bool(FORWARD_BIAS));
            }

            if tick + JUMP_BURST_MAX < length && rng.random_bool(JUMP_BURST_RATE) {
                let burst = rng.random_range(JUMP_BURST_MIN..=JUMP_BURST_MAX);
                for held in &mut inputs[tick..tick + burst] {
                    held.set(ControlChannel::Jump, true);
                    held.set(ControlChannel::Speed, true);
                    held.set(ControlChannel::Right, true);
                    held.set(ControlChannel::Left, false);
                }
                // Skip the burst so this pass does not perturb it again.
                tick += burst;
                continue;
            }

            tick += 1;
        }
        Self::from_inputs(inputs)
    }

    /// Sequence length in ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always false: construction rejects empty sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// The input sequence.
    #[must_use]
    pub fn inputs(&self) -> &[ControlVector] {
        &self.inputs
    }

    /// Consumes the chromosome, returning its input sequence.
    #[must_use]
    pub fn into_inputs(self) -> Vec<ControlVector> {
        self.inputs
    }

    /// The cached fitness, or [`Self::UNEVALUATED_FITNESS`].
    #[must_use]
    pub const fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Whether this chromosome carries an evaluation.
    #[must_use]
    pub const fn is_evaluated(&self) -> bool {
        self.summary.is_some()
    }

    /// The cached run summary from the last evaluation, if any.
    #[must_use]
    pub const fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Completion fraction of the last run, or `0.0` if unevaluated.
    #[must_use]
    pub fn completion(&self) -> f32 {
        self.summary.map_or(0.0, |summary| summary.completion())
    }

    /// Flips 1 to ⌈len/10⌉ random channel bits in place and drops the stale
    /// evaluation.
    ///
    /// This is the only mutation entry point: callers clone a parent (or take
    /// a crossover child) and mutate the copy, never a live member of the
    /// ranked population.
    pub fn mutate<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        operators::mutate(&mut self.inputs, rng);
        self.reset_evaluation();
    }

    /// Stores a completed evaluation, replacing any previous one wholesale.
    pub(crate) fn record_evaluation(&mut self, fitness: f32, summary: RunSummary) {
        self.fitness = fitness;
        self.summary = Some(summary);
    }

    /// Drops the cached evaluation (used when copying a parent into the next
    /// generation, where its sequence survives but its score must not).
    pub(crate) fn reset_evaluation(&mut self) {
        self.fitness = Self::UNEVALUATED_FITNESS;
        self.summary = None;
    }
}
