use clap::{Args, Parser, Subcommand, ValueEnum};

use audiostego_core::{EchoDelay, Embedding, LsbPlane, PhaseCoding};

use crate::commands::*;
use crate::CliResult;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    UnveilRaw(unveil_raw::UnveilRawArgs),
    Analyze(analyze::AnalyzeArgs),
    Capacity(capacity::CapacityArgs),
    Spectrum(spectrum::SpectrumArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Least significant bits of every sample
    Lsb,
    /// Phase spectrum of the first segment
    Phase,
    /// Echoes with one of two delays per bit
    Echo,
}

/// Strategy and parameters, shared by all subcommands
#[derive(Args, Debug)]
pub struct EmbeddingArgs {
    /// Embedding strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::Lsb)]
    pub strategy: Strategy,

    /// LSB: bits replaced per sample, 1 to 8
    #[arg(long = "bits", value_name = "k", default_value_t = 1)]
    pub bits_per_sample: u8,

    /// Phase: transform size, a power of two
    #[arg(long, value_name = "frames", default_value_t = 4096)]
    pub segment_length: usize,

    /// Echo: delay in samples for a 0 bit
    #[arg(long, value_name = "samples", default_value_t = 100)]
    pub delay_zero: usize,

    /// Echo: delay in samples for a 1 bit
    #[arg(long, value_name = "samples", default_value_t = 200)]
    pub delay_one: usize,

    /// Echo: echo amplitude, between 0 and 1
    #[arg(long, default_value_t = 0.6)]
    pub attenuation: f64,

    /// Echo: length of the hidden message, needed to unveil it
    #[arg(long, value_name = "characters")]
    pub message_len: Option<usize>,
}

impl EmbeddingArgs {
    pub fn embedding(&self) -> CliResult<Embedding> {
        Ok(match self.strategy {
            Strategy::Lsb => LsbPlane::new(self.bits_per_sample)?.into(),
            Strategy::Phase => PhaseCoding::new(self.segment_length)?.into(),
            Strategy::Echo => {
                let echo = EchoDelay::new(self.delay_zero, self.delay_one, self.attenuation)?;
                match self.message_len {
                    Some(len) => echo.with_message_len(len).into(),
                    None => echo.into(),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use audiostego_core::AudioStegoError;

    #[test]
    fn should_default_to_one_bit_lsb() {
        let args = CliArgs::parse_from(["audiostego", "capacity", "-i", "song.wav"]);

        let Commands::Capacity(capacity) = args.command else {
            panic!("expected the capacity command");
        };
        let embedding = capacity.embedding.embedding().unwrap();
        assert_eq!(embedding, Embedding::default());
    }

    #[test]
    fn should_build_echo_parameters() {
        let args = CliArgs::parse_from([
            "audiostego",
            "unveil",
            "-i",
            "secret.wav",
            "--strategy",
            "echo",
            "--delay-zero",
            "50",
            "--delay-one",
            "120",
            "--message-len",
            "5",
        ]);

        let Commands::Unveil(unveil) = args.command else {
            panic!("expected the unveil command");
        };
        let expected = EchoDelay::new(50, 120, 0.6).unwrap().with_message_len(5);
        assert_eq!(unveil.embedding.embedding().unwrap(), expected.into());
    }

    #[test]
    fn should_reject_invalid_parameters() {
        let args = CliArgs::parse_from([
            "audiostego",
            "capacity",
            "-i",
            "song.wav",
            "-s",
            "phase",
            "--segment-length",
            "1000",
        ]);

        let Commands::Capacity(capacity) = args.command else {
            panic!("expected the capacity command");
        };
        assert!(matches!(
            capacity.embedding.embedding(),
            Err(AudioStegoError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn should_parse_the_spectrum_paths() {
        let args = CliArgs::parse_from(["audiostego", "spectrum", "-i", "a.wav", "-o", "a.csv"]);

        let Commands::Spectrum(spectrum) = args.command else {
            panic!("expected the spectrum command");
        };
        assert_eq!(spectrum.media, PathBuf::from("a.wav"));
        assert_eq!(spectrum.output_file, PathBuf::from("a.csv"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
