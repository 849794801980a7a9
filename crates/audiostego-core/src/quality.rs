//! Distortion statistics of a hidden message.
//!
//! Compares the carrier before and after embedding: absolute sample
//! differences, the signal to noise ratio and a coarse qualitative label.
//! The label thresholds are heuristics that do not depend on the strategy,
//! they are kept stable so reports stay comparable across versions.

use std::fmt;

use crate::dsp;
use crate::error::AudioStegoError;
use crate::media::AudioBuffer;
use crate::result::Result;
use crate::strategy::{Embedding, EmbeddingStrategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityLabel {
    Imperceptible,
    LightNoisePossible,
    NoticeableDistortion,
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QualityLabel::Imperceptible => "imperceptible",
            QualityLabel::LightNoisePossible => "light noise possible",
            QualityLabel::NoticeableDistortion => "noticeable distortion",
        })
    }
}

/// Derives the label from SNR, share of changed samples and bit depth.
///
/// `bits_per_sample` is `None` for strategies that do not work on bit
/// planes, every condition on it is false then.
pub fn classify(snr_db: f64, changed_percent: f64, bits_per_sample: Option<u8>) -> QualityLabel {
    let depth_at_most = |limit: u8| bits_per_sample.map_or(false, |k| k <= limit);

    if snr_db > 60.0 && changed_percent < 5.0 && depth_at_most(2) {
        QualityLabel::Imperceptible
    } else if (snr_db > 40.0 && changed_percent < 10.0) || depth_at_most(4) {
        QualityLabel::LightNoisePossible
    } else {
        QualityLabel::NoticeableDistortion
    }
}

/// Created once per embedding, never changed afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    pub max_abs_diff: u32,
    pub mean_abs_diff: f64,
    /// `+inf` if both buffers are equal
    pub snr_db: f64,
    /// SNR after scaling both buffers to a peak of 1 independently
    pub normalized_snr_db: f64,
    /// `1 - corr(|FFT(original)|, |FFT(modified)|)`, 0 for equal buffers
    pub spectral_leakage: f64,
    pub changed_samples: usize,
    pub total_samples: usize,
    pub changed_percent: f64,
    /// capacity in characters of the original for the used parameters
    pub capacity_chars: usize,
    pub label: QualityLabel,
}

impl fmt::Display for StatisticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "max. absolute difference:  {}", self.max_abs_diff)?;
        writeln!(f, "mean absolute difference:  {:.4}", self.mean_abs_diff)?;
        writeln!(f, "SNR:                       {:.2} dB", self.snr_db)?;
        writeln!(
            f,
            "SNR (normalized):          {:.2} dB",
            self.normalized_snr_db
        )?;
        writeln!(f, "spectral leakage:          {:.6}", self.spectral_leakage)?;
        writeln!(
            f,
            "changed samples:           {} of {} ({:.2}%)",
            self.changed_samples, self.total_samples, self.changed_percent
        )?;
        writeln!(
            f,
            "capacity:                  {} characters",
            self.capacity_chars
        )?;
        write!(f, "quality:                   {}", self.label)
    }
}

/// Compares `original` and `modified` sample by sample.
///
/// Fails with [`AudioStegoError::LengthMismatch`] if the sample counts differ.
pub fn analyze(
    original: &AudioBuffer,
    modified: &AudioBuffer,
    embedding: &Embedding,
) -> Result<StatisticsReport> {
    let (a, b) = (original.samples(), modified.samples());
    if a.len() != b.len() {
        return Err(AudioStegoError::LengthMismatch {
            original: a.len(),
            modified: b.len(),
        });
    }

    let total_samples = a.len();
    let mut max_abs_diff = 0_u32;
    let mut sum_abs_diff = 0_u64;
    let mut changed_samples = 0;
    for (o, m) in a.iter().zip(b) {
        let diff = (*o as i32 - *m as i32).unsigned_abs();
        max_abs_diff = max_abs_diff.max(diff);
        sum_abs_diff += diff as u64;
        if diff != 0 {
            changed_samples += 1;
        }
    }

    let (mean_abs_diff, changed_percent) = if total_samples == 0 {
        (0.0, 0.0)
    } else {
        (
            sum_abs_diff as f64 / total_samples as f64,
            100.0 * changed_samples as f64 / total_samples as f64,
        )
    };

    let original_f: Vec<f64> = a.iter().map(|s| f64::from(*s)).collect();
    let modified_f: Vec<f64> = b.iter().map(|s| f64::from(*s)).collect();
    let snr_db = snr(&original_f, &modified_f);
    let original_n = peak_normalized(&original_f);
    let modified_n = peak_normalized(&modified_f);
    let normalized_snr_db = snr(&original_n, &modified_n);
    let spectral_leakage = if a == b {
        0.0
    } else {
        spectral_leakage(original, modified)
    };

    let label = classify(snr_db, changed_percent, embedding.bits_per_sample());

    Ok(StatisticsReport {
        max_abs_diff,
        mean_abs_diff,
        snr_db,
        normalized_snr_db,
        spectral_leakage,
        changed_samples,
        total_samples,
        changed_percent,
        capacity_chars: embedding.capacity(original)?,
        label,
    })
}

/// `10 log10(signal_power / noise_power)`, both as mean squares
fn snr(original: &[f64], modified: &[f64]) -> f64 {
    let noise_power = mean_square(original.iter().zip(modified).map(|(o, m)| o - m));
    if noise_power == 0.0 {
        return f64::INFINITY;
    }
    let signal_power = mean_square(original.iter().copied());

    10.0 * (signal_power / noise_power).log10()
}

fn mean_square(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }

    values.map(|v| v * v).sum::<f64>() / n as f64
}

fn peak_normalized(values: &[f64]) -> Vec<f64> {
    let peak = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if peak == 0.0 {
        return values.to_vec();
    }

    values.iter().map(|v| v / peak).collect()
}

/// One bin of a single sided amplitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumBin {
    /// in Hz
    pub frequency: f64,
    pub amplitude: f64,
}

/// Single sided amplitude spectrum of the downmix.
///
/// Bin `k < N/2` sits at `k * sample_rate / N` Hz and has the amplitude
/// `2/N |X_k|`, so a sine on a bin shows with its own peak value.
pub fn amplitude_spectrum(buffer: &AudioBuffer) -> Vec<SpectrumBin> {
    let signal = buffer.downmix();
    let n = signal.len() as f64;
    let bin_width = f64::from(buffer.sample_rate()) / n;

    dsp::forward(&signal)
        .iter()
        .take(signal.len() / 2)
        .enumerate()
        .map(|(k, bin)| SpectrumBin {
            frequency: k as f64 * bin_width,
            amplitude: 2.0 * bin.norm() / n,
        })
        .collect()
}

fn spectral_leakage(original: &AudioBuffer, modified: &AudioBuffer) -> f64 {
    let magnitudes = |buffer: &AudioBuffer| -> Vec<f64> {
        dsp::forward(&buffer.downmix())
            .iter()
            .map(|bin| bin.norm())
            .collect()
    };

    1.0 - dsp::correlation(&magnitudes(original), &magnitudes(modified))
}
