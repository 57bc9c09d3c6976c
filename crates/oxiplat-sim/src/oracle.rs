use std::fmt;

use crate::{ControlVector, Course, RunSummary};

/// Executes one input sequence against a course and reports the outcome.
///
/// The oracle is the boundary between the search core and the actual game
/// simulator. The core never constructs a simulator itself; it receives an
/// oracle as an injected capability, which keeps the whole search testable
/// against deterministic stubs.
///
/// # Contract
///
/// - The call is blocking; the oracle's own tick budget bounds its runtime.
/// - A failure must surface as [`OracleError`], never as a zeroed-out
///   summary — a silently zeroed summary would corrupt ranking.
/// - Implementations should be deterministic for identical `course` and
///   `inputs`. A noisy implementation is permitted, but its noise is folded
///   into fitness and reproducibility of a run is lost.
/// - Implementations must be `Send + Sync`: distinct chromosomes within a
///   generation are evaluated from parallel workers sharing one oracle.
///
/// When the input sequence is shorter than the oracle's tick budget, the
/// remaining ticks are played with
/// [`DEFAULT_ACTION`](crate::playback::DEFAULT_ACTION), matching the playback
/// fallback.
pub trait SimulationOracle: fmt::Debug + Send + Sync {
    /// Runs the full sequence and returns the structured outcome.
    fn run(&self, course: &Course, inputs: &[ControlVector]) -> Result<RunSummary, OracleError>;
}

/// Failure surface of a [`SimulationOracle`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OracleError {
    /// The simulator rejected the course descriptor.
    #[display("course rejected by simulator: {reason}")]
    CourseRejected { reason: String },
    /// The simulation could not run to completion.
    #[display("simulation failed: {reason}")]
    Failed { reason: String },
}
