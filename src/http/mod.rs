//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → parser.rs (request line, headers, Content-Length body)
//!     → server.rs (routing, handler dispatch)
//!     → response.rs (status line, fixed headers, body)
//!     → Send to client, close
//! ```

pub mod error;
pub mod parser;
pub mod request;
pub mod response;
pub mod server;

pub use error::ParseError;
pub use parser::read_request;
pub use request::{parse_form, Headers, Method, Request};
pub use response::{Response, Status};
pub use server::HttpServer;
