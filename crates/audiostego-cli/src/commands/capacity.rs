use std::path::PathBuf;

use clap::Args;

use crate::cli::EmbeddingArgs;
use crate::CliResult;

/// Shows how many characters fit into a WAV audio file
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// WAV audio file to check
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    #[command(flatten)]
    pub embedding: EmbeddingArgs,
}

impl CapacityArgs {
    pub fn run(self) -> CliResult<()> {
        let embedding = self.embedding.embedding()?;
        let report = audiostego_core::commands::capacity(&self.media, &embedding)?;
        println!("{report}");

        Ok(())
    }
}
