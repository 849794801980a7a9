use crate::error::AudioStegoError;

pub type Result<T> = std::result::Result<T, AudioStegoError>;
