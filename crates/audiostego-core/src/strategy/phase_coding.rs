//! Phase coding
//!
//! The message is written into the phase spectrum of the first segment of
//! the (down mixed) carrier: bin `i + 1` gets phase `0` for a `0` bit and `π`
//! for a `1` bit, the mirrored bin gets the negated phase so the segment
//! stays real valued. Bin 0 and the Nyquist bin are never touched.
//!
//! Decoding classifies every phase against a fixed `π/2` threshold. This is
//! only reliable as long as the carrier is not altered between hiding and
//! unveiling, any added noise moves phases towards the threshold.

use std::f64::consts::{FRAC_PI_2, PI};

use log::debug;
use rustfft::num_complex::Complex;

use super::{chars_for_bits, Embedded, EmbeddingStrategy};
use crate::bit_stream::{BitStream, Sentinel, END_MARKER};
use crate::dsp;
use crate::error::AudioStegoError;
use crate::media::{checked_sample, AudioBuffer};
use crate::result::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCoding {
    /// transform size `N`, a power of two
    pub segment_length: usize,
}

impl Default for PhaseCoding {
    fn default() -> Self {
        Self {
            segment_length: 4096,
        }
    }
}

impl PhaseCoding {
    pub const MIN_SEGMENT_LENGTH: usize = 16;

    pub fn new(segment_length: usize) -> Result<Self> {
        let coding = Self { segment_length };
        coding.validate_parameters()?;

        Ok(coding)
    }

    /// one bin per bit, bin 0 and the Nyquist bin are reserved
    pub fn max_bits(&self) -> usize {
        self.segment_length / 2 - 1
    }

    fn segment(&self, buffer: &AudioBuffer) -> Result<Vec<f64>> {
        self.check_carrier(buffer)?;
        let mut mono = buffer.downmix();
        mono.truncate(self.segment_length);

        Ok(mono)
    }
}

impl EmbeddingStrategy for PhaseCoding {
    fn sentinel(&self) -> Sentinel {
        Sentinel::Marker(END_MARKER)
    }

    fn validate_parameters(&self) -> Result<()> {
        let n = self.segment_length;
        if !n.is_power_of_two() || n < Self::MIN_SEGMENT_LENGTH {
            return Err(AudioStegoError::invalid_parameter(
                "segment_length",
                self.segment_length,
                "must be a power of two of at least 16",
            ));
        }

        Ok(())
    }

    fn check_carrier(&self, buffer: &AudioBuffer) -> Result<()> {
        self.validate_parameters()?;
        if buffer.frames() < self.segment_length {
            return Err(AudioStegoError::SegmentTooShort {
                required: self.segment_length,
                available: buffer.frames(),
            });
        }

        Ok(())
    }

    fn capacity(&self, buffer: &AudioBuffer) -> Result<usize> {
        self.validate_parameters()?;
        if buffer.frames() < self.segment_length {
            return Ok(0);
        }

        Ok(self.max_bits() / 8)
    }

    fn encode(&self, buffer: &AudioBuffer, bits: &BitStream) -> Result<Embedded> {
        let segment = self.segment(buffer)?;
        if bits.len() > self.max_bits() {
            return Err(AudioStegoError::CapacityExceeded {
                required: chars_for_bits(bits.len()),
                available: self.capacity(buffer)?,
            });
        }

        let peak = segment.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        if peak == 0.0 {
            return Err(AudioStegoError::SilentSegment);
        }
        let normalized: Vec<f64> = segment.iter().map(|s| s / peak).collect();

        let n = self.segment_length;
        let mut bins = dsp::forward(&normalized);
        for (i, bit) in bits.iter().enumerate() {
            let bin = i + 1;
            let phase = if bit { PI } else { 0.0 };
            let magnitude = bins[bin].norm();
            bins[bin] = Complex::from_polar(magnitude, phase);
            bins[n - bin] = Complex::from_polar(magnitude, -phase);
        }
        let modified = dsp::inverse_real(bins);

        // stretched to the full 16 bit range
        let modified_peak = modified.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        let scale = if modified_peak > 0.0 {
            i16::MAX as f64 / modified_peak
        } else {
            0.0
        };

        let channels = buffer.channels() as usize;
        let mut samples = buffer.samples().to_vec();
        for (frame, value) in modified.iter().enumerate() {
            let value = (value * scale).round() as i64;
            for channel in 0..channels {
                let index = frame * channels + channel;
                samples[index] = checked_sample(index, value)?;
            }
        }
        debug!(
            "Phase coding: {} bits in a segment of {} frames, peak {:.0}",
            bits.len(),
            n,
            peak
        );

        Ok(Embedded::complete(buffer.with_samples(samples)?))
    }

    fn decode(&self, buffer: &AudioBuffer) -> Result<BitStream> {
        let segment = self.segment(buffer)?;
        let bins = dsp::forward(&segment);

        Ok(bins[1..=self.max_bits()]
            .iter()
            .map(|bin| bin.arg().abs() >= FRAC_PI_2)
            .collect())
    }
}
