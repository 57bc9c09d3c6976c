/// Aggregates for one completed generation.
///
/// One record is produced per generation, after the ranking barrier and
/// before reproduction. Records are append-only: once handed to a recorder
/// they are never revised. The per-run counters (remaining ticks, kills,
/// collectibles, status) describe the generation's best chromosome.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
    /// Zero-based generation index.
    pub generation: usize,
    /// Highest fitness in the ranked population.
    pub best_fitness: f32,
    /// Mean fitness across the population.
    pub mean_fitness: f32,
    /// Highest completion fraction across the population.
    pub best_completion: f32,
    /// Mean completion fraction across the population.
    pub mean_completion: f32,
    /// Budget ticks remaining for the best chromosome's run.
    pub remaining_ticks: usize,
    /// Kill count of the best chromosome's run.
    pub kills: u32,
    /// Mushrooms collected by the best chromosome's run.
    pub mushrooms: u32,
    /// Coins collected by the best chromosome's run.
    pub coins: u32,
    /// Terminal status of the best chromosome's run.
    pub status: String,
}
