//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! Handler (create / list)
//!     → RecordStore trait (object-safe, owned by the server)
//!     → memory.rs (Vec-backed, process lifetime)
//!     → json.rs  (single JSON file, rewritten on every insert)
//! ```
//!
//! # Design Decisions
//! - Player is a plain value; it does not know how to persist itself
//! - Store is opened once at startup and dropped when the server stops
//! - No update/delete operations are exposed to the protocol layer
//! - Sequential connection handling means no internal locking; a
//!   parallel server must wrap the store in a mutex first

pub mod error;
pub mod json;
pub mod memory;
pub mod player;

use std::collections::HashMap;

pub use error::StoreError;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use player::{NewPlayer, Player};

/// Persistence boundary for player records.
pub trait RecordStore: Send + std::fmt::Debug {
    /// Insert a new record built from form fields. The store assigns the id.
    fn create(&mut self, fields: &HashMap<String, String>) -> Result<Player, StoreError>;

    /// All records in store order (ascending id for the bundled backends).
    fn list_all(&self) -> Result<Vec<Player>, StoreError>;
}
