//! Message framing of the MCP stdio transport.
//!
//! Two framings are accepted on input: an LSP-style header block
//!
//! ```text
//! Content-Length: <N>\r\n
//! \r\n
//! <N bytes of JSON>
//! ```
//!
//! and newline-delimited JSON. Responses are written in the framing of the request they answer.
//!
//! Derived from the stdio framing of sochdb-mcp (Apache-2.0).

use serde::Serialize;
use std::io::{self, BufRead, Read, Write};

const CONTENT_LENGTH: &str = "Content-Length";

/// Largest body accepted behind a `Content-Length` header.
pub const MAX_MESSAGE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// Header block, blank line, body.
    ContentLength,
    /// One JSON object per line.
    #[default]
    Ndjson,
}

/// Reads the next message body and the framing it arrived in.
///
/// Returns `Ok(None)` at end of input. Blank lines between messages are skipped. Header names are
/// matched case-insensitively and may come in any order. A body larger than
/// [`MAX_MESSAGE_BYTES`] is discarded and reported as [`io::ErrorKind::InvalidData`], so the
/// next message can still be read.
pub fn read_message(reader: &mut impl BufRead) -> io::Result<Option<(Vec<u8>, WireFormat)>> {
    let mut line = String::new();
    let first = loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            break trimmed;
        }
    };
    if first.starts_with('{') || first.starts_with('[') {
        return Ok(Some((first.as_bytes().to_vec(), WireFormat::Ndjson)));
    }
    if header(first).is_none() {
        let preview = first.chars().take(50).collect::<String>();
        return Err(invalid(format!(
            "Unknown message format, expected Content-Length or JSON, got: {preview}"
        )));
    }

    let mut length = content_length(first)?;
    let mut next = String::new();
    loop {
        next.clear();
        if reader.read_line(&mut next)? == 0 {
            return Ok(None);
        }
        if next.trim().is_empty() {
            break;
        }
        length = length.or(content_length(next.trim())?);
    }
    let length = length.ok_or_else(|| invalid("Missing Content-Length header"))?;
    if length > MAX_MESSAGE_BYTES {
        let skipped = u64::try_from(length).unwrap_or(u64::MAX);
        io::copy(&mut reader.by_ref().take(skipped), &mut io::sink())?;
        return Err(invalid(format!(
            "Content-Length {length} exceeds the limit of {MAX_MESSAGE_BYTES} bytes"
        )));
    }
    let mut body = vec![0; length];
    reader.read_exact(&mut body)?;
    Ok(Some((body, WireFormat::ContentLength)))
}

/// Splits `Name: value`, if the line is shaped like a header.
fn header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    (!name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'))
        .then_some((name, value.trim()))
}

fn content_length(line: &str) -> io::Result<Option<usize>> {
    match header(line) {
        Some((name, value)) if name.eq_ignore_ascii_case(CONTENT_LENGTH) => value
            .parse()
            .map(Some)
            .map_err(|_| invalid(format!("Invalid Content-Length header: {value}"))),
        _ => Ok(None),
    }
}

fn invalid(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.into())
}

/// Writes `message` in `format` and flushes.
pub fn write_message(
    writer: &mut impl Write,
    message: &impl Serialize,
    format: WireFormat,
) -> io::Result<()> {
    let body = serde_json::to_vec(message)?;
    match format {
        WireFormat::ContentLength => {
            write!(writer, "{CONTENT_LENGTH}: {}\r\n\r\n", body.len())?;
            writer.write_all(&body)?;
        }
        WireFormat::Ndjson => {
            writer.write_all(&body)?;
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn read_content_length_message() -> io::Result<()> {
        let mut reader = Cursor::new(
            b"Content-Length: 13\r\nContent-Type: application/json\r\n\r\n{\"test\": 123}".to_vec(),
        );

        let message = read_message(&mut reader)?;

        assert_eq!(
            message,
            Some((b"{\"test\": 123}".to_vec(), WireFormat::ContentLength))
        );
        assert_eq!(read_message(&mut reader)?, None);
        Ok(())
    }

    #[test]
    fn read_headers_in_any_order_and_case() -> io::Result<()> {
        let mut reader =
            Cursor::new(b"Content-Type: application/json\r\ncontent-length: 2\r\n\r\n{}".to_vec());

        assert_eq!(
            read_message(&mut reader)?,
            Some((b"{}".to_vec(), WireFormat::ContentLength))
        );
        Ok(())
    }

    #[test]
    fn read_ndjson_messages_skipping_blank_lines() -> io::Result<()> {
        let mut reader = Cursor::new(b"{\"a\":1}\n\n\r\n{\"b\":2}\n".to_vec());

        assert_eq!(
            read_message(&mut reader)?,
            Some((b"{\"a\":1}".to_vec(), WireFormat::Ndjson))
        );
        assert_eq!(
            read_message(&mut reader)?,
            Some((b"{\"b\":2}".to_vec(), WireFormat::Ndjson))
        );
        assert_eq!(read_message(&mut reader)?, None);
        Ok(())
    }

    #[test]
    fn reject_unknown_framing() {
        let mut reader = Cursor::new(b"hello\n".to_vec());

        let error = read_message(&mut reader).unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn reject_bad_content_length() {
        let mut reader = Cursor::new(b"Content-Length: many\r\n\r\n{}".to_vec());
        assert!(read_message(&mut reader).is_err());

        let mut reader = Cursor::new(b"Content-Type: application/json\r\n\r\n{}".to_vec());
        assert_eq!(
            read_message(&mut reader).unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
    }

    #[test]
    fn reject_oversized_body_without_reading_it() -> io::Result<()> {
        let mut reader = Cursor::new(b"Content-Length: 99999999999\r\n\r\n{}".to_vec());

        let error = read_message(&mut reader).unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        assert!(error.to_string().contains("exceeds the limit"));
        assert_eq!(read_message(&mut reader)?, None);

        let mut reader = Cursor::new(
            format!("Content-Length: {}\r\n\r\n{{\"a\":1}}\n", MAX_MESSAGE_BYTES + 1).into_bytes(),
        );
        assert!(read_message(&mut reader).is_err());
        Ok(())
    }

    #[test]
    fn write_in_both_framings() -> io::Result<()> {
        let message = json!({"test": 123});

        let mut framed = Vec::new();
        write_message(&mut framed, &message, WireFormat::ContentLength)?;
        let mut lines = Vec::new();
        write_message(&mut lines, &message, WireFormat::Ndjson)?;

        assert_eq!(framed, b"Content-Length: 12\r\n\r\n{\"test\":123}");
        assert_eq!(lines, b"{\"test\":123}\n");
        Ok(())
    }
}
