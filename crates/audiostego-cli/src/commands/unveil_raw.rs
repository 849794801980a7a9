use std::path::PathBuf;

use clap::Args;

use crate::cli::EmbeddingArgs;

/// Unveils the raw decoded bytes, without looking for the end of the message
#[derive(Args, Debug)]
pub struct UnveilRawArgs {
    /// Source audio that contains secret data
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Raw data will be stored as binary file
    #[arg(short = 'o', long = "out", value_name = "output file", required = true)]
    pub output_file: PathBuf,

    #[command(flatten)]
    pub embedding: EmbeddingArgs,
}

impl UnveilRawArgs {
    pub fn run(self) -> crate::CliResult<()> {
        let embedding = self.embedding.embedding()?;

        audiostego_core::commands::unveil_raw(&self.media, &self.output_file, embedding)
    }
}
