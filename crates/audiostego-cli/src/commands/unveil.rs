use std::path::PathBuf;

use clap::Args;

use crate::cli::EmbeddingArgs;
use crate::CliResult;

/// Unveils a text message from WAV audio files
#[derive(Args, Debug)]
pub struct UnveilArgs {
    /// Source audio that contains the secret message, or a folder of them
    #[arg(
        short = 'i',
        long = "in",
        value_name = "media source file",
        required = true
    )]
    pub media: PathBuf,

    /// Folder the message is additionally saved to, as `secret-message.txt`
    #[arg(short = 'o', long = "out", value_name = "output folder")]
    pub output_folder: Option<PathBuf>,

    #[command(flatten)]
    pub embedding: EmbeddingArgs,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let embedding = self.embedding.embedding()?;

        if self.media.is_dir() {
            for entry in audiostego_core::commands::unveil_batch(&self.media, embedding)? {
                match entry.outcome {
                    Ok(message) => println!("{}: {message}", entry.source.display()),
                    Err(e) => println!("{}: {e}", entry.source.display()),
                }
            }
            return Ok(());
        }

        let message = audiostego_core::commands::unveil(
            &self.media,
            self.output_folder.as_deref(),
            embedding,
        )?;
        println!("{message}");

        Ok(())
    }
}
