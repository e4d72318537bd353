//! Response model and wire serialization.
//!
//! # Responsibilities
//! - Carry status, content type and body for one connection
//! - Serialize in a fixed order: status line, Content-Type,
//!   Content-Length, `Connection: close`, blank line, body
//!
//! # Design Decisions
//! - Content-Length is always computed from the body's byte length;
//!   callers cannot supply it
//! - No other headers are emitted

use std::fmt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";

/// Status codes this server produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    PayloadTooLarge,
    InternalServerError,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::PayloadTooLarge => 413,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::PayloadTooLarge => "Payload Too Large",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

/// Renders as the status-line fragment, e.g. `404 Not Found`.
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: Status, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            body: body.into(),
        }
    }

    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Status::Ok, TEXT_HTML, body)
    }

    pub fn text(status: Status, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, TEXT_PLAIN, body)
    }

    /// Plain-text error response whose body is the status line.
    pub fn error(status: Status) -> Self {
        Self::text(status, format!("{status}\n"))
    }

    pub fn not_found() -> Self {
        Self::error(Status::NotFound)
    }

    pub fn bad_request() -> Self {
        Self::error(Status::BadRequest)
    }

    pub fn payload_too_large() -> Self {
        Self::error(Status::PayloadTooLarge)
    }

    pub fn internal_error() -> Self {
        Self::error(Status::InternalServerError)
    }

    /// Serialized header block including the terminating blank line.
    pub fn head(&self) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.content_type,
            self.body.len()
        )
    }

    /// Full wire representation.
    pub fn encode(&self) -> Vec<u8> {
        let head = self.head();
        let mut out = Vec::with_capacity(head.len() + self.body.len());
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(&self.body);
        out
    }

    /// Write the response and flush.
    pub async fn write_to<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(self.head().as_bytes()).await?;
        writer.write_all(&self.body).await?;
        writer.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_order_and_framing() {
        let response = Response::text(Status::Ok, "hello");
        assert_eq!(
            response.encode(),
            b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello"
        );
    }

    #[test]
    fn test_content_length_counts_bytes() {
        // 5 characters, 7 bytes
        let response = Response::text(Status::Ok, "héllö");
        assert!(response.head().contains("Content-Length: 7\r\n"));
    }

    #[test]
    fn test_not_found_body() {
        let response = Response::not_found();
        assert_eq!(response.body, b"404 Not Found\n");
        assert_eq!(response.content_type, TEXT_PLAIN);
        assert!(response.head().starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[test]
    fn test_error_bodies() {
        assert_eq!(Response::bad_request().body, b"400 Bad Request\n");
        assert_eq!(Response::payload_too_large().body, b"413 Payload Too Large\n");
        assert_eq!(Response::internal_error().body, b"500 Internal Server Error\n");
    }

    #[test]
    fn test_empty_body() {
        let response = Response::text(Status::Ok, "");
        assert!(response.encode().ends_with(b"Content-Length: 0\r\nConnection: close\r\n\r\n"));
    }

    #[tokio::test]
    async fn test_write_to_matches_encode() {
        let response = Response::html("<h1>hi</h1>");
        let mut out = Vec::new();
        response.write_to(&mut out).await.unwrap();
        assert_eq!(out, response.encode());
    }
}
