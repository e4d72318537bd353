//! Connection state machine and lifecycle tracking.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Track connection state from Accepted to Closed
//! - Reject out-of-order transitions
//! - Guarantee Closed is reached, even on early return

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Connection state for lifecycle tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting in accept.
    Listening,
    /// Socket accepted, nothing read yet.
    Accepted,
    /// Reading request line, headers and body.
    Parsing,
    /// Resolving the endpoint.
    Routing,
    /// Endpoint handler running.
    Handling,
    /// Writing the response.
    Responding,
    /// Socket released.
    Closed,
}

impl ConnectionState {
    /// Whether `next` may follow `self`.
    ///
    /// Forward edges only, plus `Parsing → Responding` for error
    /// responses and `* → Closed` for aborts.
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;

        match (self, next) {
            (Closed, _) => false,
            (_, Closed) => true,
            (Listening, Accepted)
            | (Accepted, Parsing)
            | (Parsing, Routing)
            | (Parsing, Responding)
            | (Routing, Handling)
            | (Handling, Responding) => true,
            _ => false,
        }
    }
}

/// Error for an illegal state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal connection transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: ConnectionState,
    pub to: ConnectionState,
}

/// One accepted connection's lifecycle.
///
/// Dropping a connection moves it to `Closed`.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    peer: SocketAddr,
    state: ConnectionState,
}

impl Connection {
    /// Record a freshly accepted connection.
    pub fn accepted(peer: SocketAddr) -> Self {
        let id = ConnectionId::new();
        tracing::trace!(connection_id = %id, from = ?ConnectionState::Listening, to = ?ConnectionState::Accepted, "Connection transition");
        Self {
            id,
            peer,
            state: ConnectionState::Accepted,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Move to `next`, if the edge is allowed.
    pub fn transition(&mut self, next: ConnectionState) -> Result<(), TransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(TransitionError {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!(connection_id = %self.id, from = ?self.state, to = ?next, "Connection transition");
        self.state = next;
        Ok(())
    }

    /// Mark closed. Idempotent.
    pub fn close(&mut self) {
        if self.state != ConnectionState::Closed {
            self.state = ConnectionState::Closed;
            tracing::trace!(connection_id = %self.id, "Connection closed");
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
