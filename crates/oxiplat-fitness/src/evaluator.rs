use oxiplat_sim::{ControlVector, Course, OracleError, RunSummary, SimulationOracle};

use crate::ScoreRunSummary;

/// One scored simulation run.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    /// The shaped scalar fitness.
    pub fitness: f32,
    /// The raw run outcome the fitness was shaped from.
    pub summary: RunSummary,
}

/// Drives one oracle call per candidate sequence and scores the outcome.
///
/// The evaluator borrows its oracle and scorer so a single pair can be shared
/// by every parallel evaluation worker in a generation; both traits require
/// `Send + Sync` for exactly this reason. The only failure path is the
/// oracle's own — a failed simulation propagates as [`OracleError`] instead of
/// polluting the ranking with a made-up score.
#[derive(Debug, Clone, Copy)]
pub struct FitnessEvaluator<'a> {
    oracle: &'a dyn SimulationOracle,
    scorer: &'a dyn ScoreRunSummary,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator over an injected oracle and scorer.
    #[must_use]
    pub const fn new(oracle: &'a dyn SimulationOracle, scorer: &'a dyn ScoreRunSummary) -> Self {
        Self { oracle, scorer }
    }

    /// Simulates one sequence and returns its shaped fitness with the raw
    /// summary.
    pub fn evaluate(
        &self,
        course: &Course,
        inputs: &[ControlVector],
    ) -> Result<Evaluation, OracleError> {
        let summary = self.oracle.run(course, inputs)?;
        let fitness = self.scorer.score(&summary);
        Ok(Evaluation { fitness, summary })
    }
}

#[cfg(test)]
mod tests {
    use oxiplat_sim::{KillBreakdown, TerminalStatus};

    use super::*;

    /// Oracle returning a fixed summary, or a fixed error.
    #[derive(Debug)]
    struct StubOracle(Result<RunSummary, OracleError>);

    impl SimulationOracle for StubOracle {
        fn run(
            &self,
            _course: &Course,
            _inputs: &[ControlVector],
        ) -> Result<RunSummary, OracleError> {
            self.0.clone()
        }
    }

    /// Scorer that reads back the completion fraction unchanged.
    #[derive(Debug)]
    struct CompletionScorer;

    impl ScoreRunSummary for CompletionScorer {
        fn score(&self, summary: &RunSummary) -> f32 {
            summary.completion()
        }
    }

    fn course() -> Course {
        Course::parse("stub", "----").unwrap()
    }

    #[test]
    fn test_evaluation_pairs_score_with_summary() {
        let summary = RunSummary::new(
            TerminalStatus::TimeOut,
            0.75,
            0,
            KillBreakdown::default(),
            0,
            0,
            0,
            0,
        );
        let oracle = StubOracle(Ok(summary));
        let scorer = CompletionScorer;
        let evaluator = FitnessEvaluator::new(&oracle, &scorer);

        let evaluation = evaluator.evaluate(&course(), &[]).unwrap();
        assert_eq!(evaluation.fitness, 0.75);
        assert_eq!(evaluation.summary, summary);
    }

    #[test]
    fn test_oracle_failure_propagates() {
        let oracle = StubOracle(Err(OracleError::Failed {
            reason: "boom".to_owned(),
        }));
        let scorer = CompletionScorer;
        let evaluator = FitnessEvaluator::new(&oracle, &scorer);

        let result = evaluator.evaluate(&course(), &[]);
        assert!(matches!(result, Err(OracleError::Failed { .. })));
    }
}
