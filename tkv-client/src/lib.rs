//! # tkv Sync Client
//!
//! Purpose: Provide a small, synchronous RESP2 client exposing the raw
//! byte-oriented operations the typed template layer builds on.
//!
//! ## Design Principles
//! 1. **Single Injected Handle**: One TCP connection is opened up front and
//!    shared behind a lock; no pooling, no reconnect logic.
//! 2. **Binary-Safe**: Keys and values are `&[u8]` end to end; any typing
//!    lives in the layer above.
//! 3. **Fail Fast**: Framing violations and server errors surface
//!    immediately as `ClientError`.

mod client;
mod conn;
mod error;
mod resp;

pub use client::{ClientConfig, RawClient};
pub use conn::Connection;
pub use error::{ClientError, ClientResult};
