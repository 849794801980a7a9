use std::path::PathBuf;

use clap::Args;
use log::debug;

use crate::cli::EmbeddingArgs;
use crate::CliResult;

/// Hides a text message in WAV audio files
#[derive(Args, Debug)]
pub struct HideArgs {
    /// WAV audio file, used readonly. A folder hides the message in every WAV file inside.
    #[arg(short = 'i', long = "in", value_name = "media file", required = true)]
    pub media: PathBuf,

    /// Final audio will be stored as file, or as `encoded_<name>` files into this folder
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output audio file",
        required = true
    )]
    pub write_to_file: PathBuf,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message", required = true)]
    pub message: String,

    /// Log the first changed samples on debug level
    #[arg(long, value_name = "samples", default_value_t = 0)]
    pub trace: usize,

    #[command(flatten)]
    pub embedding: EmbeddingArgs,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let embedding = self.embedding.embedding()?;

        if self.media.is_dir() {
            let entries = audiostego_core::commands::hide_batch(
                &self.media,
                &self.write_to_file,
                &self.message,
                embedding,
            )?;
            for entry in entries {
                match entry.outcome {
                    Ok(report) => println!("{}: {}", entry.source.display(), report.label),
                    Err(e) => println!("{}: {e}", entry.source.display()),
                }
            }
            return Ok(());
        }

        let concealment = audiostego_core::commands::hide(
            &self.media,
            &self.write_to_file,
            &self.message,
            embedding,
            self.trace,
        )?;
        for change in &concealment.trace {
            debug!(
                "sample {}: {} -> {}",
                change.index, change.before, change.after
            );
        }
        println!("{}", concealment.report);

        Ok(())
    }
}
