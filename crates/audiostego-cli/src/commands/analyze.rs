use std::path::PathBuf;

use clap::Args;

use crate::cli::EmbeddingArgs;
use crate::CliResult;

/// Compares a carrier with its secret counterpart
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// The carrier before the message was hidden
    #[arg(long, value_name = "original audio file", required = true)]
    pub original: PathBuf,

    /// The carrier with the hidden message
    #[arg(long, value_name = "secret audio file", required = true)]
    pub modified: PathBuf,

    /// Parameters the message was hidden with, for capacity and quality label
    #[command(flatten)]
    pub embedding: EmbeddingArgs,
}

impl AnalyzeArgs {
    pub fn run(self) -> CliResult<()> {
        let report = audiostego_core::commands::analyze(
            &self.original,
            &self.modified,
            &self.embedding.embedding()?,
        )?;
        println!("{report}");

        Ok(())
    }
}
