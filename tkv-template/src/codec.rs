//! # Key and Value Codecs
//!
//! Purpose: Define the encode/decode strategies the template is configured
//! with, and the two-way error split the whole demo hinges on:
//!
//! - [`CodecError::Foreign`]: the stored bytes were not produced by this
//!   codec at all. The template treats this as an absent value.
//! - [`CodecError::Malformed`]: the bytes are in this codec's format family
//!   but the payload is invalid. This propagates to the caller as an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Decode/encode failures for value codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Bytes are not in this codec's format; the value is unreadable but
    /// that is a configuration mismatch, not corruption.
    #[error("stored bytes were not produced by this codec")]
    Foreign,

    /// Bytes are in this codec's format but the payload does not decode.
    #[error("malformed value: {0}")]
    Malformed(String),
}

/// Strategy turning textual keys into wire bytes.
pub trait KeyCodec {
    fn encode(&self, key: &str) -> Vec<u8>;
}

/// Identity text encoding: the key's UTF-8 bytes go on the wire untouched.
///
/// This matches what command-line writers use, so a key written externally
/// and a key written through the template land in the same slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8KeyCodec;

impl KeyCodec for Utf8KeyCodec {
    fn encode(&self, key: &str) -> Vec<u8> {
        key.as_bytes().to_vec()
    }
}

/// Strategy converting between a value type and wire bytes.
pub trait ValueCodec {
    type Value;

    fn encode(&self, value: &Self::Value) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, raw: &[u8]) -> Result<Self::Value, CodecError>;
}

/// Integer values as decimal text, e.g. `1235` as `b"1235"`.
///
/// This is the codec compatible with external plain-text writers, and the
/// configuration the fixed revision of this demo uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalIntCodec;

impl ValueCodec for DecimalIntCodec {
    type Value = i64;

    fn encode(&self, value: &i64) -> Result<Vec<u8>, CodecError> {
        Ok(value.to_string().into_bytes())
    }

    fn decode(&self, raw: &[u8]) -> Result<i64, CodecError> {
        // Non-UTF-8 bytes cannot have come from a text writer.
        let text = std::str::from_utf8(raw).map_err(|_| CodecError::Foreign)?;
        text.trim()
            .parse()
            .map_err(|_| CodecError::Malformed(format!("not a decimal integer: {text:?}")))
    }
}

/// Magic prefix marking a value as written by [`BincodeValueCodec`].
const BINCODE_MAGIC: [u8; 2] = [0xB1, 0x4B];

/// Serde values in a tagged bincode envelope.
///
/// The pre-fix revision of this demo left the template on this codec, so
/// every read of an externally written decimal-text value came back absent:
/// the stored bytes carry no envelope, decoding never even starts, and the
/// template reports no value retrievable. The envelope's magic prefix is
/// what makes that mismatch detectable as [`CodecError::Foreign`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeValueCodec<T = i64> {
    _marker: std::marker::PhantomData<T>,
}

impl<T> BincodeValueCodec<T> {
    pub fn new() -> Self {
        BincodeValueCodec {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> ValueCodec for BincodeValueCodec<T> {
    type Value = T;

    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let payload =
            bincode::serialize(value).map_err(|err| CodecError::Malformed(err.to_string()))?;
        let mut out = Vec::with_capacity(BINCODE_MAGIC.len() + payload.len());
        out.extend_from_slice(&BINCODE_MAGIC);
        out.extend_from_slice(&payload);
        Ok(out)
    }

    fn decode(&self, raw: &[u8]) -> Result<T, CodecError> {
        let payload = raw
            .strip_prefix(BINCODE_MAGIC.as_slice())
            .ok_or(CodecError::Foreign)?;
        bincode::deserialize(payload).map_err(|err| CodecError::Malformed(err.to_string()))
    }
}
