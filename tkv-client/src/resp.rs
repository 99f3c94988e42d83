//! # RESP2 Framing
//!
//! Purpose: Encode outgoing commands and parse server replies without
//! external dependencies.
//!
//! Commands always go out as arrays of bulk strings. Replies are parsed
//! top-down into [`Frame`] values; bulk payloads are raw bytes and are never
//! assumed to be UTF-8.

use std::io::BufRead;

use crate::error::{ClientError, ClientResult};

/// One RESP2 reply frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// `+OK` style status line.
    Simple(Vec<u8>),
    /// `-ERR ...` error line.
    Error(Vec<u8>),
    /// `:123` integer line.
    Integer(i64),
    /// `$n` bulk string; `None` is the nil bulk (`$-1`).
    Bulk(Option<Vec<u8>>),
    /// `*n` array of nested frames.
    Array(Vec<Frame>),
}

/// Encodes `args` as a RESP2 array of bulk strings into `out`.
///
/// The buffer is appended to, not cleared, so callers can reuse it.
pub fn write_command(args: &[&[u8]], out: &mut Vec<u8>) {
    out.extend_from_slice(format!("*{}\r\n", args.len()).as_bytes());
    for arg in args {
        out.extend_from_slice(format!("${}\r\n", arg.len()).as_bytes());
        out.extend_from_slice(arg);
        out.extend_from_slice(b"\r\n");
    }
}

/// Reads a single frame from `reader`.
///
/// `scratch` holds the current header line between calls so the hot path
/// does not reallocate; its contents are meaningless to the caller.
pub fn read_frame<R: BufRead>(reader: &mut R, scratch: &mut Vec<u8>) -> ClientResult<Frame> {
    read_line(reader, scratch)?;
    if scratch.is_empty() {
        return Err(ClientError::Protocol);
    }
    match scratch[0] {
        b'+' => Ok(Frame::Simple(scratch[1..].to_vec())),
        b'-' => Ok(Frame::Error(scratch[1..].to_vec())),
        b':' => Ok(Frame::Integer(parse_int(&scratch[1..])?)),
        b'$' => {
            let len = parse_int(&scratch[1..])?;
            read_bulk(reader, len)
        }
        b'*' => {
            let len = parse_int(&scratch[1..])?;
            read_array(reader, len, scratch)
        }
        _ => Err(ClientError::Protocol),
    }
}

fn read_bulk<R: BufRead>(reader: &mut R, len: i64) -> ClientResult<Frame> {
    if len < 0 {
        return Ok(Frame::Bulk(None));
    }
    let mut data = vec![0u8; len as usize];
    reader.read_exact(&mut data)?;
    let mut crlf = [0u8; 2];
    reader.read_exact(&mut crlf)?;
    if crlf != *b"\r\n" {
        return Err(ClientError::Protocol);
    }
    Ok(Frame::Bulk(Some(data)))
}

fn read_array<R: BufRead>(reader: &mut R, len: i64, scratch: &mut Vec<u8>) -> ClientResult<Frame> {
    if len <= 0 {
        return Ok(Frame::Array(Vec::new()));
    }
    let mut items = Vec::with_capacity(len as usize);
    for _ in 0..len {
        items.push(read_frame(reader, scratch)?);
    }
    Ok(Frame::Array(items))
}

/// Reads one CRLF-terminated line into `buf`, stripping the terminator.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> ClientResult<()> {
    buf.clear();
    let n = reader.read_until(b'\n', buf)?;
    if n == 0 {
        // Clean EOF mid-reply still means the frame never arrived.
        return Err(ClientError::Protocol);
    }
    if !buf.ends_with(b"\r\n") {
        return Err(ClientError::Protocol);
    }
    buf.truncate(buf.len() - 2);
    Ok(())
}

fn parse_int(data: &[u8]) -> ClientResult<i64> {
    std::str::from_utf8(data)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or(ClientError::Protocol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &[u8]) -> ClientResult<Frame> {
        let mut reader = Cursor::new(input.to_vec());
        let mut scratch = Vec::new();
        read_frame(&mut reader, &mut scratch)
    }

    #[test]
    fn encodes_command() {
        let mut buf = Vec::new();
        write_command(&[b"SET", b"key", b"1235"], &mut buf);
        assert_eq!(&buf, b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$4\r\n1235\r\n");
    }

    #[test]
    fn parses_simple_string() {
        assert_eq!(parse(b"+OK\r\n").unwrap(), Frame::Simple(b"OK".to_vec()));
    }

    #[test]
    fn parses_error() {
        assert_eq!(
            parse(b"-ERR unknown command\r\n").unwrap(),
            Frame::Error(b"ERR unknown command".to_vec())
        );
    }

    #[test]
    fn parses_integer() {
        assert_eq!(parse(b":-2\r\n").unwrap(), Frame::Integer(-2));
    }

    #[test]
    fn parses_bulk_string() {
        assert_eq!(
            parse(b"$4\r\n1234\r\n").unwrap(),
            Frame::Bulk(Some(b"1234".to_vec()))
        );
    }

    #[test]
    fn parses_nil_bulk() {
        assert_eq!(parse(b"$-1\r\n").unwrap(), Frame::Bulk(None));
    }

    #[test]
    fn parses_nested_array() {
        assert_eq!(
            parse(b"*2\r\n:1\r\n$2\r\nok\r\n").unwrap(),
            Frame::Array(vec![Frame::Integer(1), Frame::Bulk(Some(b"ok".to_vec()))])
        );
    }

    #[test]
    fn rejects_bare_lf_line() {
        assert!(matches!(parse(b"+OK\n"), Err(ClientError::Protocol)));
    }

    #[test]
    fn rejects_unknown_type_byte() {
        assert!(matches!(parse(b"?what\r\n"), Err(ClientError::Protocol)));
    }

    #[test]
    fn rejects_truncated_bulk() {
        assert!(parse(b"$10\r\n1234\r\n").is_err());
    }
}
