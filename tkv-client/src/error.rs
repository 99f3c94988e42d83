//! Client error taxonomy.
//!
//! Connection failures are hard errors; a missing key is not an error at all
//! (it comes back as `None` from `RawClient::get`). Nothing here retries.

use thiserror::Error;

/// Result type for the sync client.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the sync client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or IO failure while connecting, reading, or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RESP2 framing or parse error.
    #[error("malformed RESP2 frame")]
    Protocol,

    /// Server replied with an error frame.
    #[error("server error: {0}")]
    Server(String),

    /// Reply frame type did not match the command that was sent.
    #[error("unexpected response type")]
    UnexpectedResponse,

    /// Address could not be parsed into a socket address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}
