//! # Audio Stego Core API
//!
//! Hides a text message in the samples of a 16 bit PCM WAV file and gets it
//! back. There are 3 embedding strategies, selected by [`Embedding`]:
//! - [`LsbPlane`] writes into the `k` least significant bits of every sample
//! - [`PhaseCoding`] writes into the phase spectrum of the first segment
//! - [`EchoDelay`] adds one of two faint echoes to a frame per bit
//!
//! Every hide reports what it cost in a [`StatisticsReport`].
//!
//! # Usage Examples
//!
//! ## Hide a message inside an audio file
//!
//! ```rust
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//!
//! let concealment = audiostego_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_audio("tests/audio/carrier-noise-mono.wav")
//!     .with_embedding(audiostego_core::LsbPlane::new(2).unwrap())
//!     .with_output(temp_dir.path().join("audio-with-secret.wav"))
//!     .execute()
//!     .expect("Failed to hide message in audio");
//!
//! println!("{}", concealment.report);
//! ```
//!
//! ## Unveil a message from an audio file
//!
//! ```rust
//! use audiostego_core::PhaseCoding;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let secret_audio = temp_dir.path().join("audio-with-secret.wav");
//! audiostego_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_audio("tests/audio/carrier-noise-mono.wav")
//!     .with_embedding(PhaseCoding::default())
//!     .with_output(&secret_audio)
//!     .execute()
//!     .expect("Failed to hide message in audio");
//!
//! let message = audiostego_core::api::unveil::prepare()
//!     .with_secret_audio(&secret_audio)
//!     .with_embedding(PhaseCoding::default())
//!     .execute()
//!     .expect("Failed to unveil message from audio");
//!
//! assert_eq!(message, "Hello, World!");
//! ```
//!
//! ## Work on buffers in memory
//!
//! ```rust
//! use audiostego_core::{pipeline, AudioBuffer, Embedding};
//!
//! let carrier = AudioBuffer::mono(vec![0; 256], 8_000).unwrap();
//! let secret = pipeline::hide(&carrier, "hi", &Embedding::default(), 0).unwrap();
//!
//! assert_eq!(pipeline::unveil(&secret.buffer, &Embedding::default()).unwrap(), "hi");
//! ```

#![warn(clippy::redundant_else)]

pub mod api;
pub mod bit_stream;
pub mod capacity;
pub mod commands;
mod dsp;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod quality;
pub mod result;
pub mod strategy;

pub use crate::bit_stream::{bits_to_text, text_to_bits, BitStream, Sentinel};
pub use crate::error::AudioStegoError;
pub use crate::media::{AudioBuffer, Persist};
pub use crate::quality::{QualityLabel, StatisticsReport};
pub use crate::result::Result;
pub use crate::strategy::{EchoDelay, Embedding, EmbeddingStrategy, LsbPlane, PhaseCoding};
