use log::trace;

use super::{chars_for_bits, Embedded, EmbeddingStrategy};
use crate::bit_stream::{BitStream, Sentinel};
use crate::error::AudioStegoError;
use crate::media::AudioBuffer;
use crate::result::Result;

/// Least significant bit substitution with a variable bit depth.
///
/// Every sample carries `bits_per_sample` bits of the stream in its lowest
/// bits, the first stream bit ends up in the highest of those bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsbPlane {
    /// bits replaced per sample, 1 to 8
    pub bits_per_sample: u8,
}

impl Default for LsbPlane {
    fn default() -> Self {
        Self { bits_per_sample: 1 }
    }
}

impl LsbPlane {
    pub const MAX_BITS_PER_SAMPLE: u8 = 8;

    pub fn new(bits_per_sample: u8) -> Result<Self> {
        let plane = Self { bits_per_sample };
        plane.validate_parameters()?;

        Ok(plane)
    }

    /// the `k` low bits of a sample
    fn mask(&self) -> i16 {
        (1 << self.bits_per_sample) - 1
    }
}

impl EmbeddingStrategy for LsbPlane {
    fn sentinel(&self) -> Sentinel {
        Sentinel::NulByte
    }

    fn validate_parameters(&self) -> Result<()> {
        if !(1..=Self::MAX_BITS_PER_SAMPLE).contains(&self.bits_per_sample) {
            return Err(AudioStegoError::invalid_parameter(
                "bits_per_sample",
                self.bits_per_sample,
                "must be between 1 and 8",
            ));
        }

        Ok(())
    }

    fn capacity(&self, buffer: &AudioBuffer) -> Result<usize> {
        self.validate_parameters()?;

        Ok(buffer.len() * self.bits_per_sample as usize / 8)
    }

    fn encode(&self, buffer: &AudioBuffer, bits: &BitStream) -> Result<Embedded> {
        let available = self.capacity(buffer)?;
        let k = self.bits_per_sample as usize;
        if bits.len() > buffer.len() * k {
            return Err(AudioStegoError::CapacityExceeded {
                required: chars_for_bits(bits.len()),
                available,
            });
        }

        let mask = self.mask();
        let mut samples = buffer.samples().to_vec();
        for (sample, chunk) in samples.iter_mut().zip(bits.as_slice().chunks(k)) {
            // a short last chunk is aligned to the top of the k bit field
            let payload = chunk
                .iter()
                .fold(0_i16, |acc, bit| (acc << 1) | i16::from(*bit))
                << (k - chunk.len());
            *sample = (*sample & !mask) | payload;
        }
        trace!(
            "LSB plane: {} bits hidden in {} samples",
            bits.len(),
            (bits.len() + k - 1) / k
        );

        Ok(Embedded::complete(buffer.with_samples(samples)?))
    }

    fn decode(&self, buffer: &AudioBuffer) -> Result<BitStream> {
        self.validate_parameters()?;
        let k = self.bits_per_sample;
        let mask = self.mask();

        Ok(buffer
            .samples()
            .iter()
            .flat_map(|sample| {
                let low = sample & mask;
                (0..k).rev().map(move |i| (low >> i) & 1 == 1)
            })
            .collect())
    }

    fn bits_per_sample(&self) -> Option<u8> {
        Some(self.bits_per_sample)
    }
}
