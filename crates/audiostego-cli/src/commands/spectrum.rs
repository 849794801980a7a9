use std::path::PathBuf;

use clap::Args;

use crate::CliResult;

/// Writes the amplitude spectrum of a WAV audio file as CSV
#[derive(Args, Debug)]
pub struct SpectrumArgs {
    /// WAV audio file to analyze
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// CSV file with one `frequency_hz,amplitude` row per bin
    #[arg(short = 'o', long = "out", value_name = "csv file", required = true)]
    pub output_file: PathBuf,
}

impl SpectrumArgs {
    pub fn run(self) -> CliResult<()> {
        let bins = audiostego_core::commands::spectrum(&self.media, &self.output_file)?;
        println!("{bins} bins written to {}", self.output_file.display());

        Ok(())
    }
}
