use clap::{Parser, Subcommand};

use self::{auto_play::AutoPlayArg, best_move::BestMoveArg};

mod auto_play;
mod best_move;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a headless game driven by the heuristic player and report the result
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Find the best placement of a piece on a board read from a file
    BestMove(#[clap(flatten)] BestMoveArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::BestMove(arg) => best_move::run(&arg)?,
    }
    Ok(())
}
