use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::media::AudioBuffer;
use crate::{pipeline, AudioStegoError, Embedding};

/// file name of the unveiled message inside the output folder
pub const SECRET_MESSAGE_FILE: &str = "secret-message.txt";

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_media: Option<PathBuf>,
    output_folder: Option<PathBuf>,
    embedding: Embedding,
}

impl UnveilApi {
    /// Use the strategy and parameters the message was hidden with
    pub fn with_embedding(mut self, embedding: impl Into<Embedding>) -> Self {
        self.embedding = embedding.into();
        self
    }

    /// This is the secret audio that contains the message to be unveiled
    pub fn with_secret_audio(mut self, secret_audio: impl AsRef<Path>) -> Self {
        self.secret_media = Some(secret_audio.as_ref().to_path_buf());
        self
    }

    /// The message is additionally saved as `secret-message.txt` in this folder
    pub fn into_output_folder(mut self, output_folder: impl AsRef<Path>) -> Self {
        self.output_folder = Some(output_folder.as_ref().to_path_buf());
        self
    }

    /// Execute the unveil process and returns the message
    pub fn execute(self) -> Result<String, AudioStegoError> {
        let Some(secret_media) = self.secret_media else {
            return Err(AudioStegoError::CarrierNotSet);
        };

        let secret = AudioBuffer::from_file(&secret_media)?;
        let message = pipeline::unveil(&secret, &self.embedding)?;

        if let Some(output_folder) = self.output_folder {
            let mut target_file = File::create(output_folder.join(SECRET_MESSAGE_FILE))
                .map_err(|source| AudioStegoError::WriteError { source })?;
            target_file
                .write_all(message.as_bytes())
                .map_err(|source| AudioStegoError::WriteError { source })?;
        }

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use std::io::read_to_string;

    use tempfile::tempdir;

    use super::SECRET_MESSAGE_FILE;
    use crate::AudioStegoError;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let secret_audio = temp_dir.path().join("secret.wav");
        crate::api::hide::prepare()
            .with_message("Hello World")
            .with_audio("tests/audio/carrier-music-stereo.wav")
            .with_output(&secret_audio)
            .execute()
            .expect("Failed to hide message in audio");

        let message = crate::api::unveil::prepare()
            .with_secret_audio(&secret_audio)
            .into_output_folder(temp_dir.path())
            .execute()
            .expect("Failed to unveil message from audio");

        assert_eq!(message, "Hello World");
        let secret_message = read_to_string(
            std::fs::File::open(temp_dir.path().join(SECRET_MESSAGE_FILE))
                .expect("Failed to open file"),
        )
        .expect("Failed to read file");
        assert_eq!(secret_message, "Hello World");
    }

    #[test]
    fn should_require_a_secret_audio() {
        assert!(matches!(
            crate::api::unveil::prepare().execute(),
            Err(AudioStegoError::CarrierNotSet)
        ));
    }
}
