//! Conversion between text messages and the ordered bit sequence that is
//! hidden inside a carrier.
//!
//! Every character is mapped to its 8 bit code point and emitted most
//! significant bit first. A [`Sentinel`] is appended so that a decoder knows
//! where the message ends.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::error::AudioStegoError;
use crate::result::Result;

/// The marker that terminates a phase coded message
pub const END_MARKER: &str = "###";

/// Terminator appended to a message before it is turned into bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// a single zero byte
    NulByte,
    /// a literal character sequence, for example [`END_MARKER`]
    Marker(&'static str),
}

impl Sentinel {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Sentinel::NulByte => &[0],
            Sentinel::Marker(marker) => marker.as_bytes(),
        }
    }

    /// number of characters the sentinel occupies in the carrier
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// position of the first sentinel occurrence in `bytes`
    fn find_in(&self, bytes: &[u8]) -> Option<usize> {
        let needle = self.as_bytes();
        if needle.is_empty() || bytes.len() < needle.len() {
            return None;
        }
        bytes.windows(needle.len()).position(|w| w == needle)
    }
}

/// Ordered sequence of bits, the unit every embedding strategy works on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// unfolds every byte into 8 bits, most significant bit first
    pub fn from_bytes(bytes: &[u8]) -> std::io::Result<Self> {
        let mut reader = BitReader::endian(Cursor::new(bytes), BigEndian);
        let mut stream = Self::with_capacity(bytes.len() * 8);
        for _ in 0..bytes.len() * 8 {
            stream.push(reader.read_bit()?);
        }

        Ok(stream)
    }

    /// folds the bits back into bytes, a trailing partial byte is discarded
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        let whole_bytes = self.bits.len() / 8;
        let mut writer = BitWriter::endian(Vec::with_capacity(whole_bytes), BigEndian);
        for bit in &self.bits[..whole_bytes * 8] {
            writer.write_bit(*bit)?;
        }

        Ok(writer.into_writer())
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for BitStream {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitStream {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Extend<bool> for BitStream {
    fn extend<T: IntoIterator<Item = bool>>(&mut self, iter: T) {
        self.bits.extend(iter);
    }
}

/// Maps every character of `message` to its 8 bit code point.
///
/// Characters above `U+00FF` and the zero character cannot be carried and
/// lead to [`AudioStegoError::UnsupportedCharacter`].
pub fn message_to_bytes(message: &str) -> Result<Vec<u8>> {
    message
        .chars()
        .enumerate()
        .map(|(position, character)| match u8::try_from(character) {
            Ok(byte) if byte != 0 => Ok(byte),
            _ => Err(AudioStegoError::UnsupportedCharacter {
                character,
                position,
            }),
        })
        .collect()
}

/// Turns a message plus its sentinel into the bit stream to hide
pub fn text_to_bits(message: &str, sentinel: Sentinel) -> Result<BitStream> {
    let mut bytes = message_to_bytes(message)?;
    bytes.extend_from_slice(sentinel.as_bytes());
    if sentinel.find_in(&bytes) != Some(bytes.len() - sentinel.len()) {
        return Err(AudioStegoError::invalid_parameter(
            "message",
            message,
            "the message must not contain the end marker",
        ));
    }

    Ok(BitStream::from_bytes(&bytes)?)
}

/// Turns recovered bits back into text, stopping at the first sentinel.
///
/// Fails with [`AudioStegoError::SentinelNotFound`] if no complete sentinel
/// is part of the stream.
pub fn bits_to_text(bits: &BitStream, sentinel: Sentinel) -> Result<String> {
    let bytes = bits.to_bytes()?;
    let end = sentinel
        .find_in(&bytes)
        .ok_or(AudioStegoError::SentinelNotFound)?;

    Ok(bytes[..end].iter().copied().map(char::from).collect())
}
