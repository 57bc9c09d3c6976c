//! Search session orchestration: configuration, seeding and the
//! generation loop.

use std::{fmt::Write as _, str::FromStr};

use oxiplat_fitness::FitnessEvaluator;
use oxiplat_sim::{ControlVector, Course, OracleError, RunSummary};
use oxiplat_stats::{DescriptiveStats, GenerationRecord, RecordGenerationStats};
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Chromosome, Population, PopulationEvolver};

/// A 128-bit seed for the session's random stream.
///
/// Serialized as a 32-character hex string so a run's seed can be copied out
/// of an artifact and passed back on the command line to reproduce the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSeed([u8; 16]);

impl SearchSeed {
    /// Wraps explicit seed bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// The raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 16] {
        self.0
    }
}

impl std::fmt::Display for SearchSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

/// Error parsing a [`SearchSeed`] from its hex form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("seed must be a 32-character hex string")]
pub struct ParseSeedError;

impl FromStr for SearchSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError);
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SearchSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for SearchSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid seed: {hex_str}")))
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<SearchSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SearchSeed(seed)
    }
}

/// Tunable parameters of one search run.
///
/// Validated once at session construction; a session never starts with an
/// invalid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Chromosomes per generation.
    pub population_size: usize,
    /// Input sequence length in ticks.
    pub sequence_length: usize,
    /// Number of generations to run.
    pub max_generations: usize,
    /// Chromosomes drawn per selection tournament.
    pub tournament_size: usize,
    /// Probability that a child is produced by crossover.
    pub crossover_rate: f32,
    /// Probability that a child is mutated.
    pub mutation_rate: f32,
    /// Explicit seed; `None` draws one from OS randomness.
    pub seed: Option<SearchSeed>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            sequence_length: 1000,
            max_generations: 50,
            tournament_size: 4,
            crossover_rate: 0.3,
            mutation_rate: 0.1,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Checks every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.sequence_length == 0 {
            return Err(ConfigError::EmptySequence);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        for (name, value) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if value.is_nan() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// A configuration constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// The population size was zero.
    #[display("population size must be at least 1")]
    EmptyPopulation,
    /// The sequence length was zero.
    #[display("sequence length must be at least 1")]
    EmptySequence,
    /// No generations were requested.
    #[display("generation count must be at least 1")]
    NoGenerations,
    /// The tournament size was zero or larger than the population.
    #[display(
        "tournament size {tournament_size} must be between 1 and the \
         population size {population_size}"
    )]
    TournamentSize {
        tournament_size: usize,
        population_size: usize,
    },
    /// A probability parameter was outside `[0, 1]`.
    #[display("{name} must be a probability in [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
}

/// Fatal failure of a search run.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum EvolutionError {
    /// The configuration was rejected.
    #[display("invalid configuration: {_0}")]
    Config(ConfigError),
    /// The simulation oracle failed; the run cannot produce honest scores.
    #[display("simulation failed: {_0}")]
    Oracle(OracleError),
}

impl From<ConfigError> for EvolutionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<OracleError> for EvolutionError {
    fn from(value: OracleError) -> Self {
        Self::Oracle(value)
    }
}

/// The best sequence a finished search produced.
#[derive(Debug, Clone)]
pub struct EvolvedSequence {
    /// The winning input sequence.
    pub inputs: Vec<ControlVector>,
    /// Its shaped fitness.
    pub fitness: f32,
    /// The raw outcome of its last evaluation.
    pub summary: RunSummary,
}

/// One search run: owns the population, the generation counter, the history
/// and the random stream.
///
/// There is no global state; two sessions with the same configuration and
/// seed, run against the same deterministic oracle, produce identical
/// histories and identical winners.
#[derive(Debug)]
pub struct EvolutionSession {
    config: EvolutionConfig,
    seed: SearchSeed,
    evolver: PopulationEvolver,
    population: Population,
    generation: usize,
    history: Vec<GenerationRecord>,
    rng: Pcg32,
}

impl EvolutionSession {
    /// Validates the configuration and builds the initial random population.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any parameter is out of range.
    pub fn new(config: EvolutionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::from_seed(seed.0);
        let population = Population::random(&mut rng, config.population_size, config.sequence_length);
        let evolver = PopulationEvolver::new(
            config.tournament_size,
            config.crossover_rate,
            config.mutation_rate,
        );
        Ok(Self {
            config,
            seed,
            evolver,
            population,
            generation: 0,
            history: Vec::with_capacity(config.max_generations),
            rng,
        })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The seed actually used, whether configured or freshly drawn.
    #[must_use]
    pub const fn seed(&self) -> SearchSeed {
        self.seed
    }

    /// Generations completed so far.
    #[must_use]
    pub const fn generation(&self) -> usize {
        self.generation
    }

    /// Per-generation aggregates, in order.
    #[must_use]
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Runs the search to completion and returns the best sequence found.
    ///
    /// Each generation is evaluated, ranked, recorded and then evolved; the
    /// final generation is evaluated and recorded but not evolved, so the
    /// returned winner is always a scored member of the last population.
    /// Recorder failures are reported to stderr and skipped — a broken stats
    /// file must not kill a long search.
    ///
    /// # Errors
    ///
    /// Returns [`EvolutionError::Oracle`] if any simulation fails; scores from
    /// a failing oracle would make the ranking meaningless, so the run aborts.
    pub fn run<R>(
        &mut self,
        course: &Course,
        evaluator: &FitnessEvaluator<'_>,
        recorder: &mut R,
    ) -> Result<EvolvedSequence, EvolutionError>
    where
        R: RecordGenerationStats + ?Sized,
    {
        for generation in 0..self.config.max_generations {
            self.population.evaluate_fitness(course, evaluator)?;

            let record = self.generation_record(generation);
            if let Err(e) = recorder.append(&record) {
                eprintln!("warning: failed to record stats for generation {generation}: {e}");
            }
            self.history.push(record);
            self.generation = generation + 1;

            if self.generation < self.config.max_generations {
                self.population = self.evolver.evolve(&self.population, &mut self.rng);
            }
        }

        let best = self.population.best();
        let summary = *best
            .summary()
            .expect("final population is always evaluated");
        Ok(EvolvedSequence {
            inputs: best.inputs().to_vec(),
            fitness: best.fitness(),
            summary,
        })
    }

    /// Aggregates the evaluated, ranked population into one record.
    fn generation_record(&self, generation: usize) -> GenerationRecord {
        let chromosomes = self.population.chromosomes();
        let fitness = DescriptiveStats::new(chromosomes.iter().map(Chromosome::fitness))
            .expect("population is never empty");
        let completion = DescriptiveStats::new(chromosomes.iter().map(Chromosome::completion))
            .expect("population is never empty");

        let best = self.population.best();
        let summary = best.summary().expect("population is evaluated");
        GenerationRecord {
            generation,
            best_fitness: fitness.max,
            mean_fitness: fitness.mean,
            best_completion: completion.max,
            mean_completion: completion.mean,
            remaining_ticks: summary.remaining_ticks(),
            kills: summary.kills().total(),
            mushrooms: summary.mushrooms(),
            coins: summary.coins(),
            status: summary.status().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use oxiplat_fitness::ScoreRunSummary;
    use oxiplat_sim::{
        ControlChannel, KillBreakdown, SimulationOracle, SyntheticOracle, TerminalStatus,
    };
    use oxiplat_stats::MemoryRecorder;

    use super::*;

    fn course() -> Course {
        Course::parse("walk", "--------------------").unwrap()
    }

    fn config(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            population_size: 12,
            sequence_length: 30,
            max_generations: 5,
            tournament_size: 3,
            crossover_rate: 0.3,
            mutation_rate: 0.1,
            seed: Some(SearchSeed::from_bytes((u128::from(seed)).to_be_bytes())),
        }
    }

    /// Oracle whose completion is the fraction of forward-moving ticks.
    #[derive(Debug)]
    struct ForwardTickOracle;

    impl SimulationOracle for ForwardTickOracle {
        fn run(
            &self,
            _course: &Course,
            inputs: &[ControlVector],
        ) -> Result<RunSummary, OracleError> {
            let forward = inputs
                .iter()
                .filter(|v| v.get(ControlChannel::Right) && !v.get(ControlChannel::Left))
                .count();
            #[expect(clippy::cast_precision_loss)]
            let completion = forward as f32 / inputs.len() as f32;
            Ok(RunSummary::new(
                TerminalStatus::TimeOut,
                completion,
                3,
                KillBreakdown::default(),
                0,
                2,
                1,
                0,
            ))
        }
    }

    #[derive(Debug)]
    struct CompletionScorer;

    impl ScoreRunSummary for CompletionScorer {
        fn score(&self, summary: &RunSummary) -> f32 {
            summary.completion()
        }
    }

    mod seed {
        use super::*;

        #[test]
        fn test_display_and_parse_roundtrip() {
            let seed = SearchSeed::from_bytes([7; 16]);
            let parsed: SearchSeed = seed.to_string().parse().unwrap();
            assert_eq!(parsed, seed);
        }

        #[test]
        fn test_serde_uses_hex_string() {
            let seed = SearchSeed::from_bytes([0; 16]);
            let json = serde_json::to_string(&seed).unwrap();
            assert_eq!(json, format!("\"{}\"", "0".repeat(32)));
            let back: SearchSeed = serde_json::from_str(&json).unwrap();
            assert_eq!(back, seed);
        }

        #[test]
        fn test_rejects_short_and_non_hex_strings() {
            assert!("abc".parse::<SearchSeed>().is_err());
            assert!("g".repeat(32).parse::<SearchSeed>().is_err());
        }
    }

    mod config_validation {
        use super::*;

        #[test]
        fn test_default_config_is_valid() {
            assert!(EvolutionConfig::default().validate().is_ok());
        }

        #[test]
        fn test_zero_sizes_are_rejected() {
            let config = EvolutionConfig {
                population_size: 0,
                ..EvolutionConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::EmptyPopulation));

            let config = EvolutionConfig {
                sequence_length: 0,
                ..EvolutionConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::EmptySequence));

            let config = EvolutionConfig {
                max_generations: 0,
                ..EvolutionConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::NoGenerations));
        }

        #[test]
        fn test_tournament_must_fit_population() {
            let default = EvolutionConfig::default();
            let config = EvolutionConfig {
                tournament_size: default.population_size + 1,
                ..default
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::TournamentSize { .. })
            ));
        }

        #[test]
        fn test_rates_must_be_probabilities() {
            let config = EvolutionConfig {
                crossover_rate: 1.5,
                ..EvolutionConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::RateOutOfRange {
                    name: "crossover_rate",
                    ..
                })
            ));

            let config = EvolutionConfig {
                mutation_rate: -0.1,
                ..EvolutionConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::RateOutOfRange {
                    name: "mutation_rate",
                    ..
                })
            ));
        }

        #[test]
        fn test_session_rejects_invalid_config() {
            let config = EvolutionConfig {
                population_size: 0,
                ..EvolutionConfig::default()
            };
            assert!(EvolutionSession::new(config).is_err());
        }
    }

    #[test]
    fn test_run_records_one_entry_per_generation() {
        let mut session = EvolutionSession::new(config(1)).unwrap();
        let oracle = ForwardTickOracle;
        let scorer = CompletionScorer;
        let evaluator = FitnessEvaluator::new(&oracle, &scorer);
        let mut recorder = MemoryRecorder::new();

        let winner = session.run(&course(), &evaluator, &mut recorder).unwrap();

        assert_eq!(recorder.records().len(), 5);
        assert_eq!(session.history(), recorder.records());
        assert_eq!(session.generation(), 5);
        assert_eq!(winner.inputs.len(), 30);
        for (index, record) in recorder.records().iter().enumerate() {
            assert_eq!(record.generation, index);
            assert!(record.best_fitness >= record.mean_fitness);
            assert!(record.best_completion >= record.mean_completion);
        }
    }

    #[test]
    fn test_best_fitness_is_monotonic_over_generations() {
        let mut session = EvolutionSession::new(config(2)).unwrap();
        let oracle = ForwardTickOracle;
        let scorer = CompletionScorer;
        let evaluator = FitnessEvaluator::new(&oracle, &scorer);
        let mut recorder = MemoryRecorder::new();

        session.run(&course(), &evaluator, &mut recorder).unwrap();

        let records = recorder.records();
        for pair in records.windows(2) {
            assert!(pair[1].best_fitness >= pair[0].best_fitness);
        }
    }

    #[test]
    fn test_seeded_sessions_reproduce_exactly() {
        let oracle = SyntheticOracle::new(60);
        let scorer = CompletionScorer;
        let evaluator = FitnessEvaluator::new(&oracle, &scorer);
        let course = Course::parse("coins", "----o---o-----o-----").unwrap();

        let mut first_recorder = MemoryRecorder::new();
        let mut first = EvolutionSession::new(config(42)).unwrap();
        let first_winner = first.run(&course, &evaluator, &mut first_recorder).unwrap();

        let mut second_recorder = MemoryRecorder::new();
        let mut second = EvolutionSession::new(config(42)).unwrap();
        let second_winner = second
            .run(&course, &evaluator, &mut second_recorder)
            .unwrap();

        assert_eq!(first_recorder.records(), second_recorder.records());
        assert_eq!(first_winner.inputs, second_winner.inputs);
        assert_eq!(first_winner.fitness, second_winner.fitness);
    }

    #[test]
    fn test_missing_seed_is_drawn_and_reported() {
        let mut config = config(3);
        config.seed = None;
        let session = EvolutionSession::new(config).unwrap();
        // The drawn seed is exposed so the run can be reproduced later.
        let reported = session.seed();
        assert_eq!(reported.to_string().len(), 32);
    }

    #[test]
    fn test_oracle_failure_aborts_the_run() {
        #[derive(Debug)]
        struct FailingOracle;

        impl SimulationOracle for FailingOracle {
            fn run(
                &self,
                _course: &Course,
                _inputs: &[ControlVector],
            ) -> Result<RunSummary, OracleError> {
                Err(OracleError::Failed {
                    reason: "stub failure".to_owned(),
                })
            }
        }

        let mut session = EvolutionSession::new(config(4)).unwrap();
        let oracle = FailingOracle;
        let scorer = CompletionScorer;
        let evaluator = FitnessEvaluator::new(&oracle, &scorer);
        let mut recorder = MemoryRecorder::new();

        let result = session.run(&course(), &evaluator, &mut recorder);
        assert!(matches!(result, Err(EvolutionError::Oracle(_))));
        assert!(recorder.records().is_empty());
    }
}
