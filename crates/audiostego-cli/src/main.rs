use clap::Parser;

use audiostego_core::AudioStegoError;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, AudioStegoError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    match args.command {
        Commands::Hide(args) => args.run(),
        Commands::Unveil(args) => args.run(),
        Commands::UnveilRaw(args) => args.run(),
        Commands::Analyze(args) => args.run(),
        Commands::Capacity(args) => args.run(),
        Commands::Spectrum(args) => args.run(),
    }
}
