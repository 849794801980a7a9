use hound::SampleFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AudioStegoError {
    /// Represents an unsupported carrier media. For example, a PNG or MP3 file
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents a WAV file whose samples are not 16 bit signed integers
    #[error("Unsupported sample format: {bits_per_sample} bit {sample_format:?}")]
    UnsupportedFormat {
        bits_per_sample: u16,
        sample_format: SampleFormat,
    },

    /// Represents an invalid carrier audio media. For example, a broken WAV file
    #[error("Audio media is invalid")]
    InvalidAudioMedia,

    /// Represents a sample that does not fit into a signed 16 bit integer,
    /// either provided by the caller or computed by an embedding strategy
    #[error("Sample {value} at index {index} is outside of the 16 bit range")]
    SampleOutOfRange { index: usize, value: i64 },

    /// Represents a message that does not fit into the carrier with the chosen strategy
    #[error("Capacity Error: {required} characters needed, {available} available")]
    CapacityExceeded { required: usize, available: usize },

    /// Represents an embedding parameter outside of its allowed range
    #[error("Invalid parameter {param} = {value}: {reason}")]
    InvalidParameter {
        param: &'static str,
        value: String,
        reason: String,
    },

    /// Represents a carrier that is shorter than the transform segment
    #[error("Carrier too short: {required} frames needed, {available} present")]
    SegmentTooShort { required: usize, available: usize },

    /// Represents a quality analysis between buffers of different sizes
    #[error("Cannot compare buffers of {original} and {modified} samples")]
    LengthMismatch { original: usize, modified: usize },

    /// Represents a decode that did not find a message terminator
    #[error("No message terminator found")]
    SentinelNotFound,

    /// Represents a character that cannot be expressed as a single payload byte
    #[error("Character {character:?} at position {position} cannot be hidden")]
    UnsupportedCharacter { character: char, position: usize },

    /// Represents echo frames that were too short to carry their bit
    #[error("Bits at positions {positions:?} could not be embedded")]
    UnembeddableBits { positions: Vec<usize> },

    /// Represents an echo frame that cannot be decoded with the configured delay
    #[error("Echo frame of {frame_length} samples cannot carry a delay of {delay}")]
    FrameTooShort { frame_length: usize, delay: usize },

    /// Represents a phase coding segment that contains only silence
    #[error("The phase coding segment is silent")]
    SilentSegment,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents a failure when encoding an audio file.
    #[error("Audio encoding error")]
    AudioEncodingError,

    /// Represents a failure when creating an audio file.
    #[error("Audio creation error")]
    AudioCreationError,

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}

impl AudioStegoError {
    pub(crate) fn invalid_parameter(
        param: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            param,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
