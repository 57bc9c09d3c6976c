use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::Context as _;
use chrono::Utc;
use oxiplat_evolution::{EvolutionConfig, EvolutionSession, SearchSeed};
use oxiplat_fitness::{FitnessEvaluator, FitnessWeights, ShapedFitness};
use oxiplat_sim::SyntheticOracle;
use oxiplat_stats::{CsvRecorder, GenerationRecord, RecordGenerationStats};

use crate::{
    schema::SequenceModel,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvolveArg {
    /// Course strip file
    #[arg(long)]
    course: PathBuf,
    /// Output file path for the evolved sequence (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Per-generation stats CSV file
    #[arg(long, default_value = "evolution_stats.csv")]
    stats: PathBuf,
    #[arg(long, default_value_t = 300)]
    population_size: usize,
    #[arg(long, default_value_t = 1000)]
    sequence_length: usize,
    #[arg(long, default_value_t = 50)]
    generations: usize,
    #[arg(long, default_value_t = 4)]
    tournament_size: usize,
    #[arg(long, default_value_t = 0.3)]
    crossover_rate: f32,
    #[arg(long, default_value_t = 0.1)]
    mutation_rate: f32,
    /// 32-character hex seed for a reproducible search
    #[arg(long)]
    seed: Option<SearchSeed>,
    /// Simulation tick budget per run
    #[arg(long, default_value_t = 1200)]
    tick_budget: usize,
}

/// Echoes a progress line per generation before forwarding to the CSV sink.
#[derive(Debug)]
struct Progress<R>(R);

impl<R> RecordGenerationStats for Progress<R>
where
    R: RecordGenerationStats,
{
    fn append(&mut self, record: &GenerationRecord) -> io::Result<()> {
        eprintln!(
            "Generation #{}: best {:.1} (mean {:.1}), completion {:.3}, {}",
            record.generation,
            record.best_fitness,
            record.mean_fitness,
            record.best_completion,
            record.status,
        );
        self.0.append(record)
    }
}

pub(crate) fn run(arg: &EvolveArg) -> anyhow::Result<()> {
    let course = util::read_course_file(&arg.course)?;

    let weights = FitnessWeights::default();
    weights.validate()?;
    let scorer = ShapedFitness::new(weights);
    let oracle = SyntheticOracle::new(arg.tick_budget);
    let evaluator = FitnessEvaluator::new(&oracle, &scorer);

    let config = EvolutionConfig {
        population_size: arg.population_size,
        sequence_length: arg.sequence_length,
        max_generations: arg.generations,
        tournament_size: arg.tournament_size,
        crossover_rate: arg.crossover_rate,
        mutation_rate: arg.mutation_rate,
        seed: arg.seed,
    };
    let mut session = EvolutionSession::new(config)?;

    eprintln!("Course: {} ({} cells)", course.name(), course.len());
    eprintln!("Seed: {}", session.seed());

    let stats_file = File::create(&arg.stats)
        .with_context(|| format!("Failed to create stats file: {}", arg.stats.display()))?;
    let mut recorder = Progress(CsvRecorder::new(BufWriter::new(stats_file))?);

    let winner = session.run(&course, &evaluator, &mut recorder)?;

    eprintln!("Search completed.");

    let model = SequenceModel {
        course: course.name().to_owned(),
        created_at: Utc::now(),
        seed: session.seed(),
        final_fitness: winner.fitness,
        completion: winner.summary.completion(),
        status: winner.summary.status(),
        inputs: winner.inputs,
    };
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Sequence saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Course: {}", model.course);
    eprintln!("  Created at: {}", model.created_at);
    eprintln!("  Final fitness: {:.3}", model.final_fitness);
    eprintln!("  Completion: {:.3}", model.completion);
    eprintln!("  Status: {}", model.status);
    eprintln!("  Stats: {}", arg.stats.display());

    Ok(())
}
