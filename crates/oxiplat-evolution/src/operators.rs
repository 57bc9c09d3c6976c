//! Genetic operators over input sequences.
//!
//! These are the raw building blocks used by
//! [`PopulationEvolver`](crate::PopulationEvolver):
//!
//! - **Selection**: [`tournament_select`] draws a small tournament and keeps
//!   the fittest
//! - **Crossover**: [`uniform_crossover`] copies each tick wholesale from one
//!   of two parents
//! - **Mutation**: [`mutate`] flips a sparse set of individual channel bits
//!
//! Crossover returns a fresh sequence; mutation edits the sequence it is
//! given in place. Callers therefore only ever mutate copies they own — the
//! ranked parent population stays untouched while children are built from it.

use oxiplat_sim::{ControlChannel, ControlVector};
use rand::{Rng, seq::index};

use crate::Chromosome;

/// Per-tick uniform crossover.
///
/// Each tick of the child is the corresponding tick of parent 1 or parent 2,
/// chosen by an independent fair coin. Vectors are copied wholesale — a child
/// tick is always bit-identical to one parent's tick, never a per-channel
/// blend.
///
/// # Panics
///
/// Panics if the parents differ in length.
pub fn uniform_crossover<R>(
    parent1: &[ControlVector],
    parent2: &[ControlVector],
    rng: &mut R,
) -> Vec<ControlVector>
where
    R: Rng + ?Sized,
{
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal sequence length"
    );
    (0..parent1.len())
        .map(|tick| {
            if rng.random_bool(0.5) {
                parent1[tick]
            } else {
                parent2[tick]
            }
        })
        .collect()
}

/// Sparse bit-flip mutation, in place.
///
/// Draws a point count uniformly from `1..=⌈len/10⌉`, then flips that many
/// distinct (tick, channel) bits. Points are sampled without replacement so
/// two flips can never cancel out: after mutation, between 1 and ⌈len/10⌉
/// ticks differ from the original.
///
/// # Panics
///
/// Panics if `inputs` is empty.
pub fn mutate<R>(inputs: &mut [ControlVector], rng: &mut R)
where
    R: Rng + ?Sized,
{
    assert!(!inputs.is_empty(), "cannot mutate an empty sequence");
    let max_points = inputs.len().div_ceil(10);
    let points = rng.random_range(1..=max_points);
    let bit_count = inputs.len() * ControlChannel::LEN;
    for bit in index::sample(rng, bit_count, points) {
        let tick = bit / ControlChannel::LEN;
        let channel = ControlChannel::ALL[bit % ControlChannel::LEN];
        inputs[tick].toggle(channel);
    }
}

/// Tournament selection.
///
/// Draws `tournament_size` distinct chromosomes uniformly at random and
/// returns the one with the strictly greatest fitness; on ties the first one
/// encountered in draw order wins. Distinct calls draw independently, so a
/// chromosome can serve as both parents of one child or as a parent many
/// times per generation.
///
/// # Panics
///
/// Panics if `tournament_size` is zero or exceeds the population size.
pub fn tournament_select<'a, R>(
    chromosomes: &'a [Chromosome],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Chromosome
where
    R: Rng + ?Sized,
{
    assert!(tournament_size > 0, "tournament size must be at least 1");
    assert!(
        tournament_size <= chromosomes.len(),
        "tournament size must not exceed the population size"
    );
    let mut best: Option<&Chromosome> = None;
    for i in index::sample(rng, chromosomes.len(), tournament_size) {
        let contender = &chromosomes[i];
        match best {
            None => best = Some(contender),
            Some(current) if contender.fitness() > current.fitness() => best = Some(contender),
            Some(_) => {}
        }
    }
    best.expect("tournament is never empty")
}
