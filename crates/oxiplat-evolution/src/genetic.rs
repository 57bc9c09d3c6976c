//! Populations and the generational reproduction policy.

use std::thread;

use oxiplat_fitness::FitnessEvaluator;
use oxiplat_sim::{Course, OracleError};
use rand::Rng;

use crate::{Chromosome, operators};

/// One generation's worth of candidate sequences.
///
/// After [`evaluate_fitness`](Self::evaluate_fitness) the chromosomes are
/// ranked best-first; reproduction requires that ordering and asserts it.
#[derive(Debug, Clone)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Generates an initial population of random chromosomes.
    ///
    /// # Panics
    ///
    /// Panics if `count` or `length` is zero.
    #[must_use]
    pub fn random<R>(rng: &mut R, count: usize, length: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        assert!(count > 0, "population must be non-empty");
        let chromosomes = (0..count)
            .map(|_| Chromosome::random(rng, length))
            .collect();
        Self { chromosomes }
    }

    /// Wraps explicit chromosomes into a population.
    ///
    /// # Panics
    ///
    /// Panics if `chromosomes` is empty.
    #[must_use]
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Self {
        assert!(!chromosomes.is_empty(), "population must be non-empty");
        Self { chromosomes }
    }

    /// The chromosomes, in their current order.
    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Number of chromosomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    /// Always false: construction rejects empty populations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// The first chromosome. After [`evaluate_fitness`](Self::evaluate_fitness)
    /// this is the generation's best.
    #[must_use]
    pub fn best(&self) -> &Chromosome {
        &self.chromosomes[0]
    }

    /// Whether the population is sorted by descending fitness.
    #[must_use]
    pub fn is_ranked(&self) -> bool {
        self.chromosomes
            .is_sorted_by(|a, b| a.fitness() >= b.fitness())
    }

    /// Evaluates every chromosome on the course and ranks the population.
    ///
    /// Chromosomes are independent, so each evaluation runs on its own scoped
    /// worker thread; the evaluator is shared by reference across workers.
    /// The ranking sort afterwards is stable, so equally-fit chromosomes keep
    /// their relative order. If any oracle call fails, the first error (in
    /// population order) is returned and the population is left unranked.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`OracleError`] if any simulation fails.
    pub fn evaluate_fitness(
        &mut self,
        course: &Course,
        evaluator: &FitnessEvaluator<'_>,
    ) -> Result<(), OracleError> {
        thread::scope(|s| {
            let workers: Vec<_> = self
                .chromosomes
                .iter_mut()
                .map(|chromosome| {
                    s.spawn(move || {
                        let evaluation = evaluator.evaluate(course, chromosome.inputs())?;
                        chromosome.record_evaluation(evaluation.fitness, evaluation.summary);
                        Ok(())
                    })
                })
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().expect("evaluation worker panicked"))
                .collect::<Result<(), OracleError>>()
        })?;

        // sort by fitness descending
        self.chromosomes.sort_by(|a, b| {
            b.fitness()
                .partial_cmp(&a.fitness())
                .expect("fitness is never NaN")
        });
        Ok(())
    }
}

/// The reproduction policy: elitism plus tournament selection, uniform
/// crossover and sparse mutation.
///
/// Rates are probabilities in `[0, 1]`; the session validates them before an
/// evolver is ever built.
#[derive(Debug, Clone, Copy)]
pub struct PopulationEvolver {
    tournament_size: usize,
    crossover_rate: f32,
    mutation_rate: f32,
}

impl PopulationEvolver {
    /// Creates an evolver with the given selection and variation parameters.
    #[must_use]
    pub const fn new(tournament_size: usize, crossover_rate: f32, mutation_rate: f32) -> Self {
        Self {
            tournament_size,
            crossover_rate,
            mutation_rate,
        }
    }

    /// Produces the next generation from a ranked population.
    ///
    /// Slot 0 of the result is a deep copy of the current best, evaluation
    /// included. Every other slot is a child: two tournament winners are
    /// either recombined tick-by-tick (with probability `crossover_rate`) or
    /// the first is copied outright, then the child is mutated with
    /// probability `mutation_rate`. Children carry no evaluation.
    ///
    /// # Panics
    ///
    /// Panics if the population is not fully evaluated and ranked.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let parents = population.chromosomes();
        assert!(
            parents.iter().all(Chromosome::is_evaluated),
            "population must be evaluated before reproduction"
        );
        assert!(
            population.is_ranked(),
            "population must be ranked before reproduction"
        );

        let mut next = Vec::with_capacity(parents.len());
        next.push(population.best().clone());
        while next.len() < parents.len() {
            let parent1 = operators::tournament_select(parents, self.tournament_size, rng);
            let parent2 = operators::tournament_select(parents, self.tournament_size, rng);

            let mut child = if rng.random_bool(f64::from(self.crossover_rate)) {
                Chromosome::from_inputs(operators::uniform_crossover(
                    parent1.inputs(),
                    parent2.inputs(),
                    rng,
                ))
            } else {
                let mut copy = parent1.clone();
                copy.reset_evaluation();
                copy
            };
            if rng.random_bool(f64::from(self.mutation_rate)) {
                child.mutate(rng);
            }
            next.push(child);
        }
        Population::from_chromosomes(next)
    }
}
