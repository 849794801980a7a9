//! Embedding strategies
//!
//! All strategies share the [`EmbeddingStrategy`] contract and are selected
//! through the [`Embedding`] tagged variant, which also carries their
//! parameters:
//! - [`LsbPlane`] replaces the `k` least significant bits of every sample
//! - [`PhaseCoding`] sets the phase of the spectrum bins of the first segment
//! - [`EchoDelay`] adds one of two attenuated echoes to every frame

mod echo_delay;
mod lsb_plane;
mod phase_coding;

use std::fmt;

use enum_dispatch::enum_dispatch;

pub use echo_delay::EchoDelay;
pub use lsb_plane::LsbPlane;
pub use phase_coding::PhaseCoding;

use crate::bit_stream::{BitStream, Sentinel};
use crate::media::AudioBuffer;
use crate::result::Result;

/// The outcome of embedding a bit stream into a carrier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    /// the carrier with the hidden bits, the source buffer is left as it was
    pub buffer: AudioBuffer,
    /// positions in the bit stream that could not be embedded
    pub unembedded: Vec<usize>,
}

impl Embedded {
    pub(crate) fn complete(buffer: AudioBuffer) -> Self {
        Self {
            buffer,
            unembedded: Vec::new(),
        }
    }
}

#[enum_dispatch]
pub trait EmbeddingStrategy {
    /// terminator appended to every message hidden with this strategy
    fn sentinel(&self) -> Sentinel;

    /// checks that all parameters are in their allowed range
    fn validate_parameters(&self) -> Result<()>;

    /// checks that the carrier can be used at all, independent of a message
    fn check_carrier(&self, _buffer: &AudioBuffer) -> Result<()> {
        Ok(())
    }

    /// maximum number of characters, sentinel included, the carrier can take
    fn capacity(&self, buffer: &AudioBuffer) -> Result<usize>;

    /// hides `bits` in a copy of `buffer`
    fn encode(&self, buffer: &AudioBuffer, bits: &BitStream) -> Result<Embedded>;

    /// recovers the raw bit stream, sentinel interpretation is left to the caller
    fn decode(&self, buffer: &AudioBuffer) -> Result<BitStream>;

    /// number of low bits replaced per sample, for strategies working on bit planes
    fn bits_per_sample(&self) -> Option<u8> {
        None
    }
}

/// Strategy selection together with its parameters
#[enum_dispatch(EmbeddingStrategy)]
#[derive(Debug, Clone, PartialEq)]
pub enum Embedding {
    LsbPlane,
    PhaseCoding,
    EchoDelay,
}

impl Default for Embedding {
    fn default() -> Self {
        Self::LsbPlane(LsbPlane::default())
    }
}

impl fmt::Display for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Embedding::LsbPlane(p) => {
                write!(f, "LSB plane, {} bit(s) per sample", p.bits_per_sample)
            }
            Embedding::PhaseCoding(p) => {
                write!(f, "phase coding, segment of {} frames", p.segment_length)
            }
            Embedding::EchoDelay(p) => write!(
                f,
                "echo delay, {}/{} samples at attenuation {}",
                p.delay_zero, p.delay_one, p.attenuation
            ),
        }
    }
}

/// number of characters needed to carry `bits`
pub(crate) fn chars_for_bits(bits: usize) -> usize {
    (bits + 7) / 8
}
