use clap::{Parser, Subcommand};

use self::{evolve::EvolveArg, replay::ReplayArg};

mod evolve;
mod replay;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Search for a course-clearing input sequence with a genetic algorithm
    Evolve(#[clap(flatten)] EvolveArg),
    /// Re-run a saved sequence against the simulator
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Evolve(arg) => evolve::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}
