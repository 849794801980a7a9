use crate::error::AudioStegoError;
use crate::result::Result;

/// In-memory PCM audio, 16 bit signed samples, interleaved if multi-channel.
///
/// Embedding never mutates a buffer in place, strategies derive a new buffer
/// with [`AudioBuffer::with_samples`] so the original stays available for
/// the quality analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    channels: u16,
    sample_rate: u32,
}

impl AudioBuffer {
    pub const BITS_PER_SAMPLE: u16 = 16;

    pub fn new(samples: Vec<i16>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 {
            return Err(AudioStegoError::invalid_parameter(
                "channels",
                channels,
                "at least one channel is required",
            ));
        }
        if samples.len() % channels as usize != 0 {
            return Err(AudioStegoError::invalid_parameter(
                "samples",
                samples.len(),
                format!("sample count is not a multiple of {channels} channels"),
            ));
        }

        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    pub fn mono(samples: Vec<i16>, sample_rate: u32) -> Result<Self> {
        Self::new(samples, 1, sample_rate)
    }

    /// Builds a buffer from wider integers, rejecting anything that does not
    /// fit into 16 bit instead of wrapping.
    pub fn from_wide_samples<I>(samples: I, channels: u16, sample_rate: u32) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let samples = samples
            .into_iter()
            .enumerate()
            .map(|(index, value)| checked_sample(index, value))
            .collect::<Result<Vec<_>>>()?;

        Self::new(samples, channels, sample_rate)
    }

    /// A new buffer with the same header but other sample data
    pub fn with_samples(&self, samples: Vec<i16>) -> Result<Self> {
        Self::new(samples, self.channels, self.sample_rate)
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bits_per_sample(&self) -> u16 {
        Self::BITS_PER_SAMPLE
    }

    /// number of samples over all channels
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// number of samples per channel
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// the samples of one channel, de-interleaved
    pub fn channel(&self, channel: u16) -> Vec<i16> {
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }

    /// mono view, the mean over all channels of every frame
    pub fn downmix(&self) -> Vec<f64> {
        let channels = self.channels as usize;
        self.samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().map(|&s| f64::from(s)).sum::<f64>())
            .map(|sum| sum / channels as f64)
            .collect()
    }
}

/// narrows a computed sample to 16 bit, `index` is only used for reporting
pub(crate) fn checked_sample(index: usize, value: i64) -> Result<i16> {
    i16::try_from(value).map_err(|_| AudioStegoError::SampleOutOfRange { index, value })
}
