//! Pre-flight capacity planning.
//!
//! Every hide runs [`validate`] before a single sample is touched, so a
//! message that does not fit never produces a partially written carrier.

use std::fmt;

use crate::bit_stream::message_to_bytes;
use crate::error::AudioStegoError;
use crate::media::AudioBuffer;
use crate::result::Result;
use crate::strategy::{Embedding, EmbeddingStrategy};

/// Maximum number of characters, sentinel included, that `embedding` can
/// hide in `buffer`.
pub fn capacity(buffer: &AudioBuffer, embedding: &Embedding) -> Result<usize> {
    embedding.capacity(buffer)
}

/// Maximum number of message characters, the sentinel already deducted
pub fn message_capacity(buffer: &AudioBuffer, embedding: &Embedding) -> Result<usize> {
    let sentinel_len = embedding.sentinel().len();
    Ok(capacity(buffer, embedding)?.saturating_sub(sentinel_len))
}

/// Capacity figures of one carrier for one set of parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityReport {
    pub embedding: Embedding,
    pub frames: usize,
    pub channels: u16,
    pub sample_rate: u32,
    /// characters, sentinel included
    pub capacity: usize,
    /// characters available to the message itself
    pub message_capacity: usize,
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "strategy: {}", self.embedding)?;
        writeln!(
            f,
            "carrier:  {} frames, {} channel(s) at {} Hz",
            self.frames, self.channels, self.sample_rate
        )?;
        write!(
            f,
            "capacity: {} characters ({} without the sentinel)",
            self.capacity, self.message_capacity
        )
    }
}

pub fn report(buffer: &AudioBuffer, embedding: &Embedding) -> Result<CapacityReport> {
    Ok(CapacityReport {
        embedding: embedding.clone(),
        frames: buffer.frames(),
        channels: buffer.channels(),
        sample_rate: buffer.sample_rate(),
        capacity: capacity(buffer, embedding)?,
        message_capacity: message_capacity(buffer, embedding)?,
    })
}

/// Checks parameters, carrier and message length against each other.
///
/// Fails with [`AudioStegoError::CapacityExceeded`] if
/// `len(message) + len(sentinel) > capacity`.
pub fn validate(buffer: &AudioBuffer, embedding: &Embedding, message: &str) -> Result<()> {
    embedding.validate_parameters()?;
    embedding.check_carrier(buffer)?;
    let message_len = message_to_bytes(message)?.len();

    let required = message_len + embedding.sentinel().len();
    let available = capacity(buffer, embedding)?;
    if required > available {
        return Err(AudioStegoError::CapacityExceeded {
            required,
            available,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{EchoDelay, LsbPlane, PhaseCoding};

    fn mono(len: usize) -> AudioBuffer {
        AudioBuffer::mono(vec![0; len], 44_100).unwrap()
    }

    fn lsb(k: u8) -> Embedding {
        LsbPlane::new(k).unwrap().into()
    }

    #[test]
    fn should_accept_a_message_that_exactly_fits() {
        // 16 samples with k = 1 carry 2 characters: one plus the sentinel
        assert!(validate(&mono(16), &lsb(1), "A").is_ok());
        assert!(matches!(
            validate(&mono(16), &lsb(1), "AB"),
            Err(AudioStegoError::CapacityExceeded {
                required: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn should_account_for_the_phase_marker() {
        let phase: Embedding = PhaseCoding::new(64).unwrap().into();

        // 31 bins carry 3 characters, exactly the marker
        assert_eq!(capacity(&mono(64), &phase).unwrap(), 3);
        assert_eq!(message_capacity(&mono(64), &phase).unwrap(), 0);
        assert!(validate(&mono(64), &phase, "").is_ok());
        assert!(validate(&mono(64), &phase, "a").is_err());
    }

    #[test]
    fn should_report_a_short_carrier_before_capacity() {
        let phase: Embedding = PhaseCoding::default().into();

        assert!(matches!(
            validate(&mono(100), &phase, "a"),
            Err(AudioStegoError::SegmentTooShort { .. })
        ));
    }

    #[test]
    fn should_validate_parameters_first() {
        let broken = Embedding::LsbPlane(LsbPlane { bits_per_sample: 0 });

        assert!(matches!(
            validate(&mono(1_000), &broken, "a"),
            Err(AudioStegoError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn should_summarize_the_carrier() {
        let stereo = AudioBuffer::new(vec![0; 200], 2, 22_050).unwrap();

        let report = report(&stereo, &lsb(2)).unwrap();

        assert_eq!(report.frames, 100);
        assert_eq!(report.channels, 2);
        assert_eq!(report.capacity, 50);
        assert_eq!(report.message_capacity, 49);
    }

    #[test]
    fn should_grow_with_bit_depth_and_buffer_length() {
        let strategies: Vec<Embedding> = vec![
            PhaseCoding::new(256).unwrap().into(),
            EchoDelay::default().into(),
        ];
        let mut previous = 0;
        for k in 1..=8 {
            let current = capacity(&mono(999), &lsb(k)).unwrap();
            assert!(current >= previous, "k = {k}");
            previous = current;
        }

        for embedding in strategies.iter().chain([lsb(1), lsb(5)].iter()) {
            let mut previous = 0;
            for len in (0..20_000).step_by(97) {
                let current = capacity(&mono(len), embedding).unwrap();
                assert!(current >= previous, "{embedding} at {len}");
                previous = current;
            }
        }
    }
}
