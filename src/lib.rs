//! Player Record Server Library
//!
//! A minimal HTTP/1.1 server over raw TCP sockets serving a small
//! persisted table of players.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
