//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed request (method, raw path)
//!     → router.rs (ordered route table)
//!     → matcher.rs (method + path conditions)
//!     → Return: Endpoint (NotFound when nothing matches)
//! ```
//!
//! # Design Decisions
//! - Route table built once, immutable afterwards
//! - Pure: no I/O, no state, same input always yields same endpoint
//! - First match wins, in table order
//! - Paths are matched raw; query strings are not stripped

pub mod matcher;
pub mod router;

pub use router::{Endpoint, Route, Router};
