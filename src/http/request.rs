//! Request model.
//!
//! # Responsibilities
//! - Represent one parsed request (method, raw path, headers, body)
//! - Case-insensitive header lookup
//! - Decode `&`-joined `key=value` form bodies
//!
//! # Design Decisions
//! - Path is kept raw: no percent-decoding, query string not stripped
//! - Header names are lower-cased at insert; last duplicate wins
//! - Form values are not percent-decoded either

use std::collections::HashMap;
use std::fmt;

use super::error::ParseError;

/// Request method. Anything other than GET/POST is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(m) => m.as_str(),
        }
    }

    /// Fixed-vocabulary name for metric labels. Unknown methods collapse
    /// to `other` so clients cannot mint new series.
    pub fn label(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other(_) => "other",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header map keyed by lower-cased name.
pub type Headers = HashMap<String, String>;

/// One request read off a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub headers: Headers,
    /// Present only when a positive Content-Length was declared.
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Declared body length.
    ///
    /// `Ok(None)` when the header is absent; a non-numeric value is
    /// [`ParseError::MalformedHeader`].
    pub fn content_length(&self) -> Result<Option<usize>, ParseError> {
        match self.header("content-length") {
            None => Ok(None),
            Some(raw) => {
                let digits = raw.trim();
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed_length(raw));
                }
                digits.parse::<usize>().map(Some).map_err(|_| malformed_length(raw))
            }
        }
    }

    /// Decoded form fields from the body (empty when there is no body).
    pub fn form(&self) -> HashMap<String, String> {
        match &self.body {
            Some(body) => parse_form(&String::from_utf8_lossy(body)),
            None => HashMap::new(),
        }
    }
}

fn malformed_length(raw: &str) -> ParseError {
    ParseError::MalformedHeader {
        name: "content-length".to_string(),
        value: raw.to_string(),
    }
}

/// Split a form-encoded body into fields.
///
/// Pairs are split on `&`, then on the first `=`. Empty segments are
/// skipped; a segment without `=` yields an empty value.
pub fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => (name.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
