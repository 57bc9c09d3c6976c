//! Generational evolutionary search over fixed-length input sequences.
//!
//! This crate is the algorithmic core of the project: it evolves populations
//! of [`Chromosome`]s — fixed-length sequences of per-tick control vectors —
//! to maximize the fitness a [`FitnessEvaluator`](oxiplat_fitness::FitnessEvaluator)
//! assigns to their simulated runs.
//!
//! # Algorithm overview
//!
//! Each generation follows the classic cycle:
//!
//! 1. **Evaluate** — every chromosome is simulated once and scored; distinct
//!    chromosomes are independent, so evaluation runs on scoped worker
//!    threads
//! 2. **Rank** — a stable descending sort by fitness (the synchronization
//!    barrier between the parallel and sequential phases)
//! 3. **Record** — best/mean fitness and completion aggregates are appended
//!    to the stats sink
//! 4. **Reproduce** — slot 0 of the next population is a deep copy of the
//!    current best (elitism); every other slot is filled by tournament
//!    selection, per-tick uniform crossover and sparse bit-flip mutation
//! 5. **Replace** — the old population is discarded wholesale
//!
//! # Key components
//!
//! - [`Chromosome`] — one candidate sequence plus its cached evaluation
//! - [`Population`] — the generation's candidates, ranked after evaluation
//! - [`PopulationEvolver`] — selection/crossover/mutation policy
//! - [`EvolutionSession`] — the orchestrator owning population, generation
//!   counter and history; there is no ambient global state
//!
//! # Initialization bias
//!
//! Uniform random sequences almost never clear the first obstacle that needs
//! a sustained jump, so [`Chromosome::random`] seeds the population with a
//! forward-motion prior and occasional multi-tick jump bursts instead of pure
//! noise. See the module documentation of [`chromosome`] for the exact
//! policy.
//!
//! # Reproducibility
//!
//! All stochastic decisions draw from one PCG stream owned by the session,
//! seeded from an explicit [`SearchSeed`] or from OS randomness. Evaluation
//! itself consumes no randomness, so a seeded session with a deterministic
//! oracle replays exactly.
//!
//! # Limitations
//!
//! - Single-objective only: the scorer collapses every objective into one
//!   scalar
//! - No adaptive parameter control: rates are fixed for the whole run
//! - No convergence guarantee: this is a stochastic local-search heuristic

pub use self::{chromosome::*, genetic::*, session::*};

pub mod chromosome;
pub mod genetic;
pub mod operators;
pub mod session;
