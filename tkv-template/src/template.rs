//! # Typed Template Facade
//!
//! `KvTemplate` binds a shared raw client to one key codec and one value
//! codec. It holds no per-call state; constructing it once at startup and
//! holding it for the process lifetime is the intended use.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use tkv_client::{ClientError, RawClient};

use crate::codec::{CodecError, KeyCodec, ValueCodec};

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors surfaced by the typed template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The underlying connection failed; surfaced as-is, never retried.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A stored value is in this codec's format but does not decode.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Typed get/set facade over a shared store connection.
///
/// The connection is injected, not owned: callers build the `RawClient`,
/// wrap it in an `Arc`, and may hand the same handle to other components.
pub struct KvTemplate<K: KeyCodec, V: ValueCodec> {
    client: Arc<RawClient>,
    key_codec: K,
    value_codec: V,
}

impl<K: KeyCodec, V: ValueCodec> KvTemplate<K, V> {
    /// Binds `client` to the given codec pair.
    pub fn new(client: Arc<RawClient>, key_codec: K, value_codec: V) -> Self {
        KvTemplate {
            client,
            key_codec,
            value_codec,
        }
    }

    /// Stores `value` under `key`.
    pub fn set(&self, key: &str, value: &V::Value) -> TemplateResult<()> {
        let wire_key = self.key_codec.encode(key);
        let wire_value = self.value_codec.encode(value)?;
        self.client.set(&wire_key, &wire_value)?;
        Ok(())
    }

    /// Fetches the value under `key`.
    ///
    /// Returns `Ok(None)` both when the key is missing and when the stored
    /// bytes were written by an incompatible codec. Only a value that is in
    /// this codec's format but fails to decode is an error.
    pub fn get(&self, key: &str) -> TemplateResult<Option<V::Value>> {
        let wire_key = self.key_codec.encode(key);
        let raw = match self.client.get(&wire_key)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match self.value_codec.decode(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(CodecError::Foreign) => {
                debug!(key, "stored bytes do not match the configured value codec");
                Ok(None)
            }
            Err(err) => Err(TemplateError::Codec(err)),
        }
    }

    /// Deletes `key`. Returns true when a value was removed.
    pub fn delete(&self, key: &str) -> TemplateResult<bool> {
        let wire_key = self.key_codec.encode(key);
        Ok(self.client.del(&wire_key)?)
    }
}
