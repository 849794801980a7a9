//! Echo hiding
//!
//! The first channel of the carrier is cut into one equal frame per bit. A
//! frame carries a `0` by adding a copy of itself, attenuated and delayed by
//! `delay_zero` samples, and a `1` with `delay_one`. The decoder compares the
//! autocorrelation of every frame at both delays.

use log::{debug, warn};

use super::{Embedded, EmbeddingStrategy};
use crate::bit_stream::{BitStream, Sentinel};
use crate::dsp;
use crate::error::AudioStegoError;
use crate::media::{checked_sample, AudioBuffer};
use crate::result::Result;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EchoDelay {
    /// echo delay in samples that encodes a `0`
    pub delay_zero: usize,
    /// echo delay in samples that encodes a `1`
    pub delay_one: usize,
    /// echo amplitude relative to the frame, in `(0, 1)`
    pub attenuation: f64,
    /// message length in characters, without the sentinel. The frame layout
    /// depends on it, so it is required for decoding.
    pub message_len: Option<usize>,
}

impl Default for EchoDelay {
    fn default() -> Self {
        Self {
            delay_zero: 100,
            delay_one: 200,
            attenuation: 0.6,
            message_len: None,
        }
    }
}

impl EchoDelay {
    pub fn new(delay_zero: usize, delay_one: usize, attenuation: f64) -> Result<Self> {
        let echo = Self {
            delay_zero,
            delay_one,
            attenuation,
            message_len: None,
        };
        echo.validate_parameters()?;

        Ok(echo)
    }

    pub fn with_message_len(mut self, message_len: usize) -> Self {
        self.message_len = Some(message_len);
        self
    }

    fn max_delay(&self) -> usize {
        self.delay_zero.max(self.delay_one)
    }

    fn delay_for(&self, bit: bool) -> usize {
        if bit {
            self.delay_one
        } else {
            self.delay_zero
        }
    }
}

impl EmbeddingStrategy for EchoDelay {
    fn sentinel(&self) -> Sentinel {
        Sentinel::NulByte
    }

    fn validate_parameters(&self) -> Result<()> {
        if self.delay_zero == 0 || self.delay_one == 0 {
            return Err(AudioStegoError::invalid_parameter(
                "delay",
                format!("{}/{}", self.delay_zero, self.delay_one),
                "delays must be at least one sample",
            ));
        }
        if self.delay_zero == self.delay_one {
            return Err(AudioStegoError::invalid_parameter(
                "delay",
                format!("{}/{}", self.delay_zero, self.delay_one),
                "the delays for 0 and 1 must differ",
            ));
        }
        if !(self.attenuation > 0.0 && self.attenuation < 1.0) {
            return Err(AudioStegoError::invalid_parameter(
                "attenuation",
                self.attenuation,
                "must be in the open interval (0, 1)",
            ));
        }

        Ok(())
    }

    fn capacity(&self, buffer: &AudioBuffer) -> Result<usize> {
        self.validate_parameters()?;
        // the largest bit count whose frames stay longer than the largest delay
        let max_bits = buffer.frames() / (self.max_delay() + 1);

        Ok(max_bits / 8)
    }

    fn encode(&self, buffer: &AudioBuffer, bits: &BitStream) -> Result<Embedded> {
        self.validate_parameters()?;
        if bits.is_empty() {
            return Err(AudioStegoError::invalid_parameter(
                "bits",
                0,
                "at least one bit is required",
            ));
        }

        let carrier = buffer.channel(0);
        let frame_length = carrier.len() / bits.len();
        let channels = buffer.channels() as usize;
        let mut samples = buffer.samples().to_vec();
        let mut unembedded = Vec::new();

        for (i, bit) in bits.iter().enumerate() {
            let delay = self.delay_for(bit);
            if frame_length <= delay {
                unembedded.push(i);
                continue;
            }
            let start = i * frame_length;
            let frame = &carrier[start..start + frame_length];
            for n in delay..frame_length {
                // the echo is truncated towards zero before it is mixed in
                let echo = (frame[n - delay] as f64 * self.attenuation) as i64;
                let index = (start + n) * channels;
                samples[index] = checked_sample(index, frame[n] as i64 + echo)?;
            }
        }

        if !unembedded.is_empty() {
            warn!(
                "Echo delay: {} of {} bits do not fit into frames of {} samples",
                unembedded.len(),
                bits.len(),
                frame_length
            );
        }
        debug!(
            "Echo delay: {} bits in frames of {} samples",
            bits.len(),
            frame_length
        );

        Ok(Embedded {
            buffer: buffer.with_samples(samples)?,
            unembedded,
        })
    }

    fn decode(&self, buffer: &AudioBuffer) -> Result<BitStream> {
        self.validate_parameters()?;
        let message_len = self.message_len.ok_or_else(|| {
            AudioStegoError::invalid_parameter(
                "message_len",
                "none",
                "the message length is required to locate the echo frames",
            )
        })?;
        let bit_count = (message_len + self.sentinel().len()) * 8;

        let carrier: Vec<f64> = buffer.channel(0).into_iter().map(f64::from).collect();
        let frame_length = carrier.len() / bit_count;
        if frame_length <= self.max_delay() {
            return Err(AudioStegoError::FrameTooShort {
                frame_length,
                delay: self.max_delay(),
            });
        }

        Ok(carrier
            .chunks_exact(frame_length)
            .take(bit_count)
            .map(|frame| {
                let zero = autocorrelation(frame, self.delay_zero);
                let one = autocorrelation(frame, self.delay_one);
                // equal correlations decode as 1
                !(zero > one)
            })
            .collect())
    }
}

/// correlation of `frame` with itself shifted by `delay`
fn autocorrelation(frame: &[f64], delay: usize) -> f64 {
    dsp::correlation(&frame[..frame.len() - delay], &frame[delay..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_stream::{bits_to_text, text_to_bits};

    fn noise(samples: usize, seed: u64) -> Vec<i16> {
        let mut rng = fastrand::Rng::with_seed(seed);
        (0..samples).map(|_| rng.i16(-8_000..=8_000)).collect()
    }

    #[test]
    fn should_round_trip_a_short_message() {
        let echo = EchoDelay::default();
        let bits = text_to_bits("hey", Sentinel::NulByte).unwrap();
        let carrier = AudioBuffer::mono(noise(bits.len() * 2_048, 42), 44_100).unwrap();

        let secret = echo.encode(&carrier, &bits).unwrap();
        assert!(secret.unembedded.is_empty());

        let decoded = echo.with_message_len(3).decode(&secret.buffer).unwrap();
        assert_eq!(decoded, bits);
        assert_eq!(bits_to_text(&decoded, Sentinel::NulByte).unwrap(), "hey");
    }

    #[test]
    fn should_only_touch_the_first_channel() {
        let echo = EchoDelay::default();
        let bits = text_to_bits("st", Sentinel::NulByte).unwrap();
        let frames = bits.len() * 1_024;
        let carrier = AudioBuffer::new(noise(frames * 2, 1), 2, 44_100).unwrap();

        let secret = echo.encode(&carrier, &bits).unwrap().buffer;

        assert_eq!(secret.channel(1), carrier.channel(1));
        assert_ne!(secret.channel(0), carrier.channel(0));
        let decoded = echo.with_message_len(2).decode(&secret).unwrap();
        assert_eq!(bits_to_text(&decoded, Sentinel::NulByte).unwrap(), "st");
    }

    #[test]
    fn should_report_bits_whose_frame_is_shorter_than_the_delay() {
        let echo = EchoDelay::default();
        let bits = text_to_bits("hi", Sentinel::NulByte).unwrap();
        // frames of 150 samples hold the 100 sample echo, not the 200 sample one
        let carrier = AudioBuffer::mono(noise(bits.len() * 150, 2), 44_100).unwrap();

        let secret = echo.encode(&carrier, &bits).unwrap();

        // h = 0110 1000, i = 0110 1001
        assert_eq!(secret.unembedded, vec![1, 2, 4, 9, 10, 12, 15]);
        let skipped = &secret.buffer.samples()[150..450];
        assert_eq!(skipped, &carrier.samples()[150..450]);
    }

    #[test]
    fn should_refuse_to_decode_frames_shorter_than_the_delay() {
        let echo = EchoDelay::default().with_message_len(2);
        let carrier = AudioBuffer::mono(noise(24 * 150, 3), 44_100).unwrap();

        assert!(matches!(
            echo.decode(&carrier),
            Err(AudioStegoError::FrameTooShort {
                frame_length: 150,
                delay: 200
            })
        ));
    }

    #[test]
    fn should_decode_ties_as_one() {
        let echo = EchoDelay::default().with_message_len(0);
        let carrier = AudioBuffer::mono(vec![1_234; 8 * 500], 44_100).unwrap();

        let decoded = echo.decode(&carrier).unwrap();

        assert_eq!(decoded, BitStream::from(vec![true; 8]));
    }

    #[test]
    fn should_require_the_message_length_for_decoding() {
        let carrier = AudioBuffer::mono(noise(10_000, 4), 44_100).unwrap();

        assert!(matches!(
            EchoDelay::default().decode(&carrier),
            Err(AudioStegoError::InvalidParameter {
                param: "message_len",
                ..
            })
        ));
    }

    #[test]
    fn should_reject_loud_echoes_instead_of_wrapping() {
        let echo = EchoDelay::new(1, 2, 0.9).unwrap();
        let carrier = AudioBuffer::mono(vec![30_000; 64], 44_100).unwrap();
        let bits = BitStream::from(vec![false; 8]);

        assert!(matches!(
            echo.encode(&carrier, &bits),
            Err(AudioStegoError::SampleOutOfRange {
                index: 1,
                value: 57_000
            })
        ));
    }

    #[test]
    fn should_validate_delays_and_attenuation() {
        assert!(EchoDelay::new(0, 200, 0.6).is_err());
        assert!(EchoDelay::new(100, 100, 0.6).is_err());
        assert!(EchoDelay::new(100, 200, 0.0).is_err());
        assert!(EchoDelay::new(100, 200, 1.0).is_err());
        assert!(EchoDelay::new(100, 200, f64::NAN).is_err());
        assert!(EchoDelay::new(200, 100, 0.5).is_ok());
    }

    #[test]
    fn should_derive_capacity_from_the_largest_delay() {
        let echo = EchoDelay::default();
        let carrier = AudioBuffer::mono(vec![0; 201 * 24], 44_100).unwrap();

        assert_eq!(echo.capacity(&carrier).unwrap(), 3);
        let shorter = AudioBuffer::mono(vec![0; 201 * 24 - 1], 44_100).unwrap();
        assert_eq!(echo.capacity(&shorter).unwrap(), 2);
    }
}
