//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept one at a time)
//!     → connection.rs (id, state machine, close on drop)
//!     → Hand off to HTTP layer
//!
//! Connection States:
//!     Listening → Accepted → Parsing → Routing → Handling → Responding → Closed
//! ```
//!
//! # Design Decisions
//! - One connection in flight; the next accept waits for Closed
//! - No read timeouts: a silent peer stalls the loop until it disconnects
//! - Every path out of a connection ends in Closed

pub mod connection;
pub mod listener;

pub use connection::{Connection, ConnectionId, ConnectionState};
pub use listener::{Listener, ListenerError};
