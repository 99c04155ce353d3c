use clap::{Parser, Subcommand};

use self::{
    maps::MapsArg,
    play::{AutoPlayArg, ManualPlayArg},
    train_ai::TrainAiArg,
};

mod maps;
pub(crate) mod play;
mod train_ai;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a match from the terminal against AI opponents
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Watch AIs play a match against each other
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Train AI weights using a genetic algorithm
    TrainAi(#[clap(flatten)] TrainAiArg),
    /// List the built-in maps
    Maps(#[clap(flatten)] MapsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()))
    {
        Mode::ManualPlay(arg) => play::run_manual(&arg)?,
        Mode::AutoPlay(arg) => play::run_auto(&arg)?,
        Mode::TrainAi(arg) => train_ai::run(&arg)?,
        Mode::Maps(arg) => maps::run(&arg)?,
    }
    Ok(())
}
