use std::path::{Path, PathBuf};

use crate::media::{AudioBuffer, Persist};
use crate::pipeline::{self, Concealment};
use crate::{AudioStegoError, Embedding};

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<String>,
    audio: Option<PathBuf>,
    output: Option<PathBuf>,
    embedding: Embedding,
    trace_limit: usize,
}

impl HideApi {
    /// Use the given strategy and parameters, LSB with 1 bit if not set
    pub fn with_embedding(mut self, embedding: impl Into<Embedding>) -> Self {
        self.embedding = embedding.into();
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn use_message<S: AsRef<str>>(mut self, message: Option<S>) -> Self {
        self.message = message.map(|s| s.as_ref().to_string());
        self
    }

    /// This is the carrier audio, a 16 bit PCM WAV file
    pub fn with_audio<A: AsRef<Path>>(mut self, audio: A) -> Self {
        self.audio = Some(audio.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Collect up to `limit` changed samples, see [`Concealment::trace`]
    pub fn with_trace_limit(mut self, limit: usize) -> Self {
        self.trace_limit = limit;
        self
    }

    /// Hides the message and writes the carrier to the output file.
    /// Nothing is written if the message cannot be hidden.
    pub fn execute(self) -> Result<Concealment, AudioStegoError> {
        let Some(message) = self.message else {
            return Err(AudioStegoError::MissingMessage);
        };
        let Some(audio) = self.audio else {
            return Err(AudioStegoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(AudioStegoError::TargetNotSet);
        };

        let carrier = AudioBuffer::from_file(&audio)?;
        let concealment = pipeline::hide(&carrier, &message, &self.embedding, self.trace_limit)?;
        concealment.buffer.save_as(&output)?;

        Ok(concealment)
    }
}
