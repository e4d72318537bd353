//! Request parsing over a buffered byte stream.
//!
//! # Responsibilities
//! - Read the request line and split it into method and path
//! - Read header lines until the first blank line
//! - Read exactly Content-Length body bytes, never more
//!
//! # Design Decisions
//! - Lines may end in CRLF or bare LF
//! - Header lines without `": "` are skipped, not fatal
//! - No Content-Length means no body read at all: a read-to-EOF here
//!   would block until the peer gives up
//! - An unparsable Content-Length is logged and treated as absent
//! - The request line and headers share one byte budget, so neither a
//!   long line nor an endless header block can grow without bound

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use super::error::ParseError;
use super::request::{Headers, Method, Request};
use crate::config::LimitsConfig;

/// Bytes of request head still allowed on this connection.
struct HeadBudget {
    limit: usize,
    remaining: usize,
}

impl HeadBudget {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    fn exceeded(&self) -> ParseError {
        ParseError::HeadTooLarge { limit: self.limit }
    }
}

/// Read one request from `reader`.
///
/// A head longer than `limits.max_head_bytes` is rejected as soon as the
/// budget runs out. Declared bodies larger than `limits.max_body_bytes`
/// are rejected before any body byte is read.
pub async fn read_request<R>(reader: &mut R, limits: &LimitsConfig) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut budget = HeadBudget::new(limits.max_head_bytes);

    let request_line = match read_line(reader, &mut budget).await? {
        Some(line) => line,
        None => return Err(ParseError::EmptyRequest),
    };

    let mut tokens = request_line.split_whitespace();
    let (method, path) = match (tokens.next(), tokens.next()) {
        (Some(method), Some(path)) => (Method::parse(method), path.to_string()),
        _ => return Err(ParseError::MalformedRequestLine(request_line)),
    };

    let headers = read_headers(reader, &mut budget).await?;
    let mut request = Request {
        method,
        path,
        headers,
        body: None,
    };

    let declared = match request.content_length() {
        Ok(len) => len,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring body");
            None
        }
    };

    if let Some(len) = declared.filter(|len| *len > 0) {
        if len > limits.max_body_bytes {
            return Err(ParseError::BodyTooLarge {
                declared: len,
                limit: limits.max_body_bytes,
            });
        }
        request.body = Some(read_body(reader, len).await?);
    }

    Ok(request)
}

/// Read header lines up to and including the blank separator line.
///
/// End of stream also ends the header block.
async fn read_headers<R>(reader: &mut R, budget: &mut HeadBudget) -> Result<Headers, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers = Headers::new();

    while let Some(line) = read_line(reader, budget).await? {
        if line.trim().is_empty() {
            break;
        }
        match line.split_once(": ") {
            Some((name, value)) => {
                headers.insert(name.to_ascii_lowercase(), value.to_string());
            }
            None => tracing::debug!(line = %line, "Skipping header line without separator"),
        }
    }

    Ok(headers)
}

async fn read_body<R>(reader: &mut R, expected: usize) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut body = vec![0u8; expected];
    let mut received = 0;

    while received < expected {
        let n = reader.read(&mut body[received..]).await?;
        if n == 0 {
            return Err(ParseError::TruncatedBody { expected, received });
        }
        received += n;
    }

    Ok(body)
}

/// Read one line without its terminator. `None` at end of stream.
///
/// Never reads past the remaining head budget.
async fn read_line<R>(reader: &mut R, budget: &mut HeadBudget) -> Result<Option<String>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    if budget.remaining == 0 {
        return Err(budget.exceeded());
    }

    let mut buf = Vec::new();
    let n = (&mut *reader)
        .take(budget.remaining as u64)
        .read_until(b'\n', &mut buf)
        .await?;
    if n == 0 {
        return Ok(None);
    }

    budget.remaining -= n;
    if budget.remaining == 0 && buf.last() != Some(&b'\n') {
        return Err(budget.exceeded());
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
