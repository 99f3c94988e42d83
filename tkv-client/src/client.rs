//! # Raw Client API
//!
//! Purpose: Expose the blocking, byte-oriented command surface the typed
//! template layer is built on: GET, SET, DEL, FLUSHALL, PING.
//!
//! `RawClient` is a facade over a single [`Connection`]. The connection is
//! owned by the client and serialized behind a mutex so one `Arc<RawClient>`
//! can be shared process-wide. There is no pooling and no reconnect: a dead
//! connection stays dead and every call on it reports the IO failure.

use std::time::Duration;

use parking_lot::Mutex;

use crate::conn::Connection;
use crate::error::{ClientError, ClientResult};
use crate::resp::Frame;

/// Connection configuration for the raw client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Store address, e.g. "127.0.0.1:6379".
    pub addr: String,
    /// Optional TCP connect timeout.
    pub connect_timeout: Option<Duration>,
    /// Optional TCP read timeout.
    pub read_timeout: Option<Duration>,
    /// Optional TCP write timeout.
    pub write_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            addr: "127.0.0.1:6379".to_string(),
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

/// Blocking client over one shared store connection.
pub struct RawClient {
    conn: Mutex<Connection>,
}

impl RawClient {
    /// Opens a connection per `config` and wraps it.
    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        Ok(Self::from_connection(Connection::open(&config)?))
    }

    /// Wraps an already-open connection handle.
    pub fn from_connection(conn: Connection) -> Self {
        RawClient {
            conn: Mutex::new(conn),
        }
    }

    /// Fetches the raw bytes stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is missing; the store signals this
    /// with a nil bulk, not an error.
    pub fn get(&self, key: &[u8]) -> ClientResult<Option<Vec<u8>>> {
        match self.exec(&[b"GET", key])? {
            Frame::Bulk(data) => Ok(data),
            other => Err(unexpected(other)),
        }
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set(&self, key: &[u8], value: &[u8]) -> ClientResult<()> {
        match self.exec(&[b"SET", key, value])? {
            Frame::Simple(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Deletes `key`. Returns true when a value was removed.
    pub fn del(&self, key: &[u8]) -> ClientResult<bool> {
        match self.exec(&[b"DEL", key])? {
            Frame::Integer(count) => Ok(count > 0),
            other => Err(unexpected(other)),
        }
    }

    /// Removes every key in the store. Test-setup path.
    pub fn flush_all(&self) -> ClientResult<()> {
        match self.exec(&[b"FLUSHALL"])? {
            Frame::Simple(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Pings the store and returns the reply payload.
    pub fn ping(&self) -> ClientResult<Vec<u8>> {
        match self.exec(&[b"PING"])? {
            Frame::Simple(text) => Ok(text),
            Frame::Bulk(Some(data)) => Ok(data),
            other => Err(unexpected(other)),
        }
    }

    fn exec(&self, args: &[&[u8]]) -> ClientResult<Frame> {
        self.conn.lock().exec(args)
    }
}

/// Maps a reply frame that did not match the command into an error.
fn unexpected(frame: Frame) -> ClientError {
    match frame {
        Frame::Error(message) => ClientError::Server(String::from_utf8_lossy(&message).into_owned()),
        _ => ClientError::UnexpectedResponse,
    }
}
