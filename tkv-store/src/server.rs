//! # RESP2 Server Loop
//!
//! Accept TCP connections, parse RESP2 command arrays, and dispatch them to
//! the in-memory engine. The command surface is exactly what the demo needs:
//! PING, GET, SET, DEL, FLUSHALL. A missing key replies with the nil bulk;
//! arity mistakes and unknown commands reply `-ERR` and keep the connection
//! open.

use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, warn};

use crate::engine::Store;

/// Serves connections on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, store: Arc<Store>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(%err, "accept failed");
                continue;
            }
        };
        debug!(%peer, "connection opened");

        let store = Arc::clone(&store);
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, store).await {
                debug!(%peer, %err, "connection closed with error");
            } else {
                debug!(%peer, "connection closed");
            }
        });
    }
}

/// Runs the request/reply loop for one client until it disconnects.
async fn handle_connection(stream: TcpStream, store: Arc<Store>) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    while let Some(args) = read_command(&mut reader).await? {
        let reply = dispatch(&args, &store);
        write_half.write_all(&reply).await?;
        write_half.flush().await?;
    }
    Ok(())
}

/// Reads one RESP2 array-of-bulks command.
///
/// Returns `Ok(None)` on clean EOF between commands. Any framing violation
/// is an error; recovering mid-stream is not worth it for a test store.
async fn read_command(
    reader: &mut BufReader<OwnedReadHalf>,
) -> std::io::Result<Option<Vec<Vec<u8>>>> {
    let header = match read_line(reader).await? {
        Some(line) => line,
        None => return Ok(None),
    };
    let count = match header.strip_prefix(b"*".as_slice()) {
        Some(digits) => parse_len(digits)?,
        None => return Err(invalid("expected array header")),
    };

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        let header = read_line(reader)
            .await?
            .ok_or_else(|| invalid("eof inside command"))?;
        let len = match header.strip_prefix(b"$".as_slice()) {
            Some(digits) => parse_len(digits)?,
            None => return Err(invalid("expected bulk header")),
        };

        let mut data = vec![0u8; len];
        reader.read_exact(&mut data).await?;
        let mut crlf = [0u8; 2];
        reader.read_exact(&mut crlf).await?;
        if crlf != *b"\r\n" {
            return Err(invalid("bulk payload not CRLF terminated"));
        }
        args.push(data);
    }
    Ok(Some(args))
}

async fn read_line(reader: &mut BufReader<OwnedReadHalf>) -> std::io::Result<Option<Vec<u8>>> {
    let mut line = Vec::new();
    let n = reader.read_until(b'\n', &mut line).await?;
    if n == 0 {
        return Ok(None);
    }
    if !line.ends_with(b"\r\n") {
        return Err(invalid("line not CRLF terminated"));
    }
    line.truncate(line.len() - 2);
    Ok(Some(line))
}

fn parse_len(digits: &[u8]) -> std::io::Result<usize> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| invalid("bad length"))
}

fn invalid(msg: &str) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, msg)
}

fn dispatch(args: &[Vec<u8>], store: &Store) -> Vec<u8> {
    let cmd = match args.first() {
        Some(cmd) => cmd.to_ascii_uppercase(),
        None => return error_reply("empty command"),
    };

    match cmd.as_slice() {
        b"PING" => match args.len() {
            1 => simple_reply("PONG"),
            2 => bulk_reply(&args[1]),
            _ => error_reply("wrong number of arguments for PING"),
        },
        b"GET" => {
            if args.len() != 2 {
                return error_reply("wrong number of arguments for GET");
            }
            match store.get(&args[1]) {
                Some(value) => bulk_reply(&value),
                None => nil_reply(),
            }
        }
        b"SET" => {
            if args.len() != 3 {
                return error_reply("wrong number of arguments for SET");
            }
            store.set(&args[1], Bytes::copy_from_slice(&args[2]));
            simple_reply("OK")
        }
        b"DEL" => {
            if args.len() < 2 {
                return error_reply("wrong number of arguments for DEL");
            }
            let removed = args[1..].iter().filter(|key| store.del(key)).count();
            integer_reply(removed as i64)
        }
        b"FLUSHALL" => {
            if args.len() != 1 {
                return error_reply("wrong number of arguments for FLUSHALL");
            }
            store.flush_all();
            simple_reply("OK")
        }
        _ => {
            debug!(cmd = %String::from_utf8_lossy(&cmd), "unknown command");
            error_reply("unknown command")
        }
    }
}

fn simple_reply(message: &str) -> Vec<u8> {
    format!("+{message}\r\n").into_bytes()
}

fn error_reply(message: &str) -> Vec<u8> {
    format!("-ERR {message}\r\n").into_bytes()
}

fn integer_reply(value: i64) -> Vec<u8> {
    format!(":{value}\r\n").into_bytes()
}

fn bulk_reply(data: &[u8]) -> Vec<u8> {
    let mut reply = format!("${}\r\n", data.len()).into_bytes();
    reply.extend_from_slice(data);
    reply.extend_from_slice(b"\r\n");
    reply
}

fn nil_reply() -> Vec<u8> {
    b"$-1\r\n".to_vec()
}
