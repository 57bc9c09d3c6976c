use std::path::PathBuf;

use oxiplat_sim::{
    ActionPlayer, ControlVector, SimulationOracle as _, SyntheticOracle,
};

use crate::{schema::SequenceModel, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Saved sequence JSON file
    #[arg(long)]
    sequence: PathBuf,
    /// Course strip file
    #[arg(long)]
    course: PathBuf,
    /// Simulation tick budget
    #[arg(long, default_value_t = 1200)]
    tick_budget: usize,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let model: SequenceModel = util::read_json_file("sequence", &arg.sequence)?;
    let course = util::read_course_file(&arg.course)?;

    // Materialize the full tick budget through the player so a sequence
    // shorter than the budget falls back to the default forward action.
    let mut player = ActionPlayer::new(model.inputs);
    let actions: Vec<ControlVector> = (0..arg.tick_budget).map(|_| player.next_action()).collect();

    let oracle = SyntheticOracle::new(arg.tick_budget);
    let summary = oracle.run(&course, &actions)?;

    println!("Replay of {} on course {}:", arg.sequence.display(), course.name());
    println!("  Sequence length: {} ticks", player.len());
    println!("  Recorded fitness: {:.3}", model.final_fitness);
    println!("  Recorded completion: {:.3}", model.completion);
    println!("  Status: {}", summary.status());
    println!("  Completion: {:.3}", summary.completion());
    println!("  Remaining ticks: {}", summary.remaining_ticks());
    println!("  Kills: {}", summary.kills().total());
    println!("  Coins: {}", summary.coins());
    println!("  Mushrooms: {}", summary.mushrooms());
    println!("  Fire flowers: {}", summary.fire_flowers());
    println!("  Hits taken: {}", summary.hits_taken());

    Ok(())
}
