use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::media::AudioBuffer;
use crate::{pipeline, AudioStegoError, Embedding};

pub fn prepare() -> UnveilRawApi {
    UnveilRawApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilRawApi {
    secret_media: Option<PathBuf>,
    destination_file: Option<PathBuf>,
    embedding: Embedding,
}

impl UnveilRawApi {
    /// Use the strategy and parameters the data was hidden with
    pub fn with_embedding(mut self, embedding: impl Into<Embedding>) -> Self {
        self.embedding = embedding.into();
        self
    }

    /// This is the secret audio that contains the data to be unveiled
    pub fn with_secret_audio(mut self, secret_audio: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_audio.as_ref().to_path_buf());
        self
    }

    /// This is the raw file where all data will be saved to
    pub fn into_raw_file(mut self, destination_file: impl AsRef<Path>) -> Self {
        self.destination_file = Some(destination_file.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process, the sentinel is not interpreted
    pub fn execute(self) -> Result<(), AudioStegoError> {
        let Some(secret_media) = self.secret_media else {
            return Err(AudioStegoError::CarrierNotSet);
        };
        let Some(destination_file) = self.destination_file else {
            return Err(AudioStegoError::TargetNotSet);
        };

        let secret = AudioBuffer::from_file(&secret_media)?;
        let content = pipeline::unveil_raw(&secret, &self.embedding)?;

        let mut destination_file = File::create(destination_file)
            .map_err(|source| AudioStegoError::WriteError { source })?;

        destination_file
            .write_all(content.as_slice())
            .map_err(|source| AudioStegoError::WriteError { source })
    }
}
