//! Endpoint handlers.
//!
//! Each handler turns a routed request into a [`Response`](crate::http::Response).
//! Failures are converted here; nothing propagates past a handler.

pub mod players;
pub mod static_page;

pub use players::{create_player, list_players};
pub use static_page::static_page;

use crate::http::Response;

pub fn not_found() -> Response {
    Response::not_found()
}
