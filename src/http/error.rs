//! Request parsing errors.

/// Conditions raised while reading a request off a connection.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Peer closed before sending a request line.
    #[error("connection closed before a request was sent")]
    EmptyRequest,

    /// Request line had fewer than two tokens.
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// A header value could not be interpreted.
    #[error("malformed {name} header: {value:?}")]
    MalformedHeader { name: String, value: String },

    /// Request line and headers did not end within the configured limit.
    #[error("request head exceeds limit of {limit} bytes")]
    HeadTooLarge { limit: usize },

    /// Peer closed before the declared body arrived.
    #[error("body truncated: expected {expected} bytes, received {received}")]
    TruncatedBody { expected: usize, received: usize },

    /// Declared body exceeds the configured limit.
    #[error("declared body of {declared} bytes exceeds limit of {limit}")]
    BodyTooLarge { declared: usize, limit: usize },

    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::EmptyRequest => "empty_request",
            ParseError::MalformedRequestLine(_) => "malformed_request_line",
            ParseError::MalformedHeader { .. } => "malformed_header",
            ParseError::HeadTooLarge { .. } => "head_too_large",
            ParseError::TruncatedBody { .. } => "truncated_body",
            ParseError::BodyTooLarge { .. } => "body_too_large",
            ParseError::Io(_) => "io",
        }
    }
}
