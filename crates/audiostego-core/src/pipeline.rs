//! In-memory hide and unveil.
//!
//! Hiding runs the capacity check, turns the message into bits, lets the
//! strategy write them into a copy of the carrier and finally compares both
//! buffers. Nothing here touches the file system.

use log::{debug, info};

use crate::bit_stream::{bits_to_text, text_to_bits};
use crate::capacity;
use crate::error::AudioStegoError;
use crate::media::AudioBuffer;
use crate::quality::{analyze, StatisticsReport};
use crate::result::Result;
use crate::strategy::{Embedding, EmbeddingStrategy};

/// A sample that was changed while hiding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleChange {
    pub index: usize,
    pub before: i16,
    pub after: i16,
}

/// A carrier with a hidden message and what it cost
#[derive(Debug, Clone)]
pub struct Concealment {
    pub buffer: AudioBuffer,
    pub report: StatisticsReport,
    /// the first changed samples, at most as many as requested
    pub trace: Vec<SampleChange>,
}

/// Hides `message` in a copy of `carrier`.
///
/// On any error the carrier is left as it was. `trace_limit` bounds the
/// number of [`SampleChange`] records collected, 0 disables the trace.
pub fn hide(
    carrier: &AudioBuffer,
    message: &str,
    embedding: &Embedding,
    trace_limit: usize,
) -> Result<Concealment> {
    capacity::validate(carrier, embedding, message)?;
    let bits = text_to_bits(message, embedding.sentinel())?;

    let embedded = embedding.encode(carrier, &bits)?;
    if !embedded.unembedded.is_empty() {
        return Err(AudioStegoError::UnembeddableBits {
            positions: embedded.unembedded,
        });
    }

    let report = analyze(carrier, &embedded.buffer, embedding)?;
    let trace = sample_trace(carrier, &embedded.buffer, trace_limit);
    info!(
        "Hid {} characters with {}: {}",
        message.chars().count(),
        embedding,
        report.label
    );

    Ok(Concealment {
        buffer: embedded.buffer,
        report,
        trace,
    })
}

/// Recovers a message hidden with the same strategy and parameters
pub fn unveil(secret: &AudioBuffer, embedding: &Embedding) -> Result<String> {
    embedding.validate_parameters()?;
    let bits = embedding.decode(secret)?;
    debug!("Decoded {} bits with {}", bits.len(), embedding);

    bits_to_text(&bits, embedding.sentinel())
}

/// All decoded bytes, without looking for the sentinel
pub fn unveil_raw(secret: &AudioBuffer, embedding: &Embedding) -> Result<Vec<u8>> {
    embedding.validate_parameters()?;

    Ok(embedding.decode(secret)?.to_bytes()?)
}

fn sample_trace(before: &AudioBuffer, after: &AudioBuffer, limit: usize) -> Vec<SampleChange> {
    before
        .samples()
        .iter()
        .zip(after.samples())
        .enumerate()
        .filter(|(_, (b, a))| b != a)
        .take(limit)
        .map(|(index, (before, after))| SampleChange {
            index,
            before: *before,
            after: *after,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::QualityLabel;
    use crate::strategy::{EchoDelay, LsbPlane, PhaseCoding};

    fn noise(samples: usize, seed: u64) -> AudioBuffer {
        let mut rng = fastrand::Rng::with_seed(seed);
        let samples = (0..samples).map(|_| rng.i16(-8_000..=8_000)).collect();
        AudioBuffer::mono(samples, 44_100).unwrap()
    }

    #[test]
    fn should_hide_and_unveil_with_lsb() {
        let carrier = noise(4_000, 1);
        let embedding = Embedding::default();

        let secret = hide(&carrier, "Hello World!", &embedding, 0).unwrap();

        assert_eq!(unveil(&secret.buffer, &embedding).unwrap(), "Hello World!");
        assert!(secret.trace.is_empty());
        assert_eq!(secret.report.total_samples, 4_000);
        assert!(secret.report.changed_samples <= 8 * 13);
        assert_eq!(secret.report.label, QualityLabel::Imperceptible);
    }

    #[test]
    fn should_collect_a_bounded_trace() {
        let carrier = AudioBuffer::mono(vec![0; 64], 8_000).unwrap();
        let embedding: Embedding = LsbPlane::new(2).unwrap().into();

        let secret = hide(&carrier, "~~", &embedding, 3).unwrap();

        // '~' = 01 11 11 10
        assert_eq!(
            secret.trace,
            vec![
                SampleChange {
                    index: 0,
                    before: 0,
                    after: 1
                },
                SampleChange {
                    index: 1,
                    before: 0,
                    after: 3
                },
                SampleChange {
                    index: 2,
                    before: 0,
                    after: 3
                },
            ]
        );
    }

    #[test]
    fn should_fail_before_touching_the_carrier() {
        let carrier = noise(16, 2);
        let embedding = Embedding::default();

        assert!(matches!(
            hide(&carrier, "AB", &embedding, 0),
            Err(AudioStegoError::CapacityExceeded {
                required: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn should_round_trip_echo_delay() {
        let carrier = noise(32 * 2_048, 42);
        let embedding: Embedding = EchoDelay::default().into();

        let secret = hide(&carrier, "hey", &embedding, 0).unwrap();
        let decoder: Embedding = EchoDelay::default().with_message_len(3).into();

        assert_eq!(unveil(&secret.buffer, &decoder).unwrap(), "hey");
        assert!(matches!(
            unveil(&secret.buffer, &embedding),
            Err(AudioStegoError::InvalidParameter {
                param: "message_len",
                ..
            })
        ));
    }

    #[test]
    fn should_refuse_echo_frames_too_short_for_the_delays() {
        // 2_400 samples hold 11 frames of 201 samples, a single character
        let carrier = noise(2_400, 3);
        let embedding: Embedding = EchoDelay::default().into();

        assert!(matches!(
            hide(&carrier, "hi", &embedding, 0),
            Err(AudioStegoError::CapacityExceeded {
                required: 3,
                available: 1
            })
        ));
    }

    #[test]
    fn should_round_trip_phase_coding() {
        let carrier = noise(5_000, 4);
        let embedding: Embedding = PhaseCoding::default().into();

        let secret = hide(&carrier, "hi", &embedding, 10).unwrap();

        assert_eq!(unveil(&secret.buffer, &embedding).unwrap(), "hi");
        assert_eq!(secret.trace.len(), 10);
        assert_eq!(secret.report.label, QualityLabel::NoticeableDistortion);
    }

    #[test]
    fn should_return_the_raw_bytes() {
        let carrier = AudioBuffer::mono(vec![0; 40], 8_000).unwrap();
        let embedding = Embedding::default();

        let secret = hide(&carrier, "ok", &embedding, 0).unwrap();
        let raw = unveil_raw(&secret.buffer, &embedding).unwrap();

        assert_eq!(raw, b"ok\0\0\0");
    }
}
