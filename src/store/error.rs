//! Store error type.

/// Failures surfaced by a [`RecordStore`](super::RecordStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backing file could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file exists but does not decode as a player table.
    #[error("store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A submitted field is unknown or not settable on creation.
    #[error("field `{0}` cannot be set on a new player")]
    InvalidField(String),

    /// A required field was not submitted.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}
