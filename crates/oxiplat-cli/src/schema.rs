use chrono::{DateTime, Utc};
use oxiplat_evolution::SearchSeed;
use oxiplat_sim::{ControlVector, TerminalStatus};
use serde::{Deserialize, Serialize};

/// The JSON artifact produced by `evolve` and consumed by `replay`.
///
/// Inputs serialize as pressed-letter strings (`"RSJ"`, `""` for an idle
/// tick), so the artifact stays readable and diffable. The seed is carried so
/// the search that produced the sequence can be reproduced exactly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SequenceModel {
    pub course: String,
    pub created_at: DateTime<Utc>,
    pub seed: SearchSeed,
    pub final_fitness: f32,
    pub completion: f32,
    pub status: TerminalStatus,
    pub inputs: Vec<ControlVector>,
}
