//! # Connection Handle
//!
//! Purpose: Own one TCP stream to the store plus the reusable buffers for
//! RESP2 framing. The connection is opened once, injected into whatever
//! wants it, and never re-established by this layer.

use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpStream};

use crate::client::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::resp::{read_frame, write_command, Frame};

/// A single open connection to the store.
///
/// Buffers live on the connection so repeated commands do not reallocate.
pub struct Connection {
    reader: BufReader<TcpStream>,
    line_buf: Vec<u8>,
    write_buf: Vec<u8>,
}

impl Connection {
    /// Opens a TCP connection according to `config`.
    ///
    /// Connect failure is a hard error for the caller; nothing here retries.
    pub fn open(config: &ClientConfig) -> ClientResult<Self> {
        let addr: SocketAddr = config
            .addr
            .parse()
            .map_err(|_| ClientError::InvalidAddress(config.addr.clone()))?;

        let stream = match config.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };
        stream.set_read_timeout(config.read_timeout)?;
        stream.set_write_timeout(config.write_timeout)?;
        // Small request/reply payloads; Nagle only adds latency here.
        stream.set_nodelay(true)?;

        Ok(Connection {
            reader: BufReader::new(stream),
            line_buf: Vec::with_capacity(128),
            write_buf: Vec::with_capacity(256),
        })
    }

    /// Sends one command and reads its reply frame.
    pub(crate) fn exec(&mut self, args: &[&[u8]]) -> ClientResult<Frame> {
        self.write_buf.clear();
        write_command(args, &mut self.write_buf);

        let stream = self.reader.get_mut();
        stream.write_all(&self.write_buf)?;
        stream.flush()?;

        read_frame(&mut self.reader, &mut self.line_buf)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}
