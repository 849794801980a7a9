use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::Path;

pub use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, error};

use crate::error::AudioStegoError;
use crate::result::Result;

use super::buffer::AudioBuffer;
use super::Persist;

/// true if the path carries a `.wav` extension, case insensitive
pub fn is_wav_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

impl AudioBuffer {
    /// Loads a 16 bit PCM WAV file
    pub fn from_file(f: &Path) -> Result<Self> {
        if !is_wav_file(f) {
            return Err(AudioStegoError::UnsupportedMedia);
        }
        let file = File::open(f).map_err(|source| AudioStegoError::ReadError { source })?;

        Self::from_reader(BufReader::new(file))
    }

    /// Loads 16 bit PCM WAV data from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = WavReader::new(reader).map_err(|e| {
            error!("Error reading wav header: {e}");
            AudioStegoError::InvalidAudioMedia
        })?;
        let spec = reader.spec();
        if spec.bits_per_sample != AudioBuffer::BITS_PER_SAMPLE
            || spec.sample_format != SampleFormat::Int
        {
            return Err(AudioStegoError::UnsupportedFormat {
                bits_per_sample: spec.bits_per_sample,
                sample_format: spec.sample_format,
            });
        }

        let samples = reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                error!("Error reading wav samples: {e}");
                AudioStegoError::InvalidAudioMedia
            })?;
        debug!(
            "Loaded {} samples, {} channel(s) at {} Hz",
            samples.len(),
            spec.channels,
            spec.sample_rate
        );

        Self::new(samples, spec.channels, spec.sample_rate)
    }

    /// the container header this buffer is written with
    pub fn spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels(),
            sample_rate: self.sample_rate(),
            bits_per_sample: self.bits_per_sample(),
            sample_format: SampleFormat::Int,
        }
    }

    pub fn save_to_writer<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut wav_writer =
            WavWriter::new(writer, self.spec()).map_err(|_| AudioStegoError::AudioCreationError)?;
        for sample in self.samples() {
            wav_writer
                .write_sample(*sample)
                .map_err(|_| AudioStegoError::AudioEncodingError)?;
        }
        wav_writer
            .finalize()
            .map_err(|_| AudioStegoError::AudioEncodingError)
    }
}

impl Persist for AudioBuffer {
    fn save_as(&self, file: &Path) -> Result<()> {
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            AudioStegoError::WriteError { source: e }
        })?;
        self.save_to_writer(std::io::BufWriter::new(f))
    }
}

/// Reads a 16 bit PCM WAV file into memory
pub fn load(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    AudioBuffer::from_file(path.as_ref())
}

/// Writes `buffer` as WAV file, with the header of the source carrier
pub fn store(buffer: &AudioBuffer, path: impl AsRef<Path>) -> Result<()> {
    buffer.save_as(path.as_ref())
}
