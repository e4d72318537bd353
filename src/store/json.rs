//! JSON file persistence for player records.
//!
//! # Responsibilities
//! - Load the player table from disk once at startup
//! - Rewrite the file on every insert before acknowledging it
//!
//! # Design Decisions
//! - Missing file = empty table (created on open)
//! - Writes go to a sibling temp file, then rename over the original
//! - A failed write rolls back the in-memory insert

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{NewPlayer, Player, RecordStore, StoreError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Table {
    players: Vec<Player>,
}

/// A record store persisted as a single JSON document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: Table,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty file if none exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let table: Table = serde_json::from_reader(reader).map_err(|e| {
                if e.is_io() {
                    StoreError::Io(e.into())
                } else {
                    StoreError::Corrupt(e)
                }
            })?;
            tracing::info!(
                path = %path.display(),
                players = table.players.len(),
                "Loaded player store"
            );
            return Ok(Self { path, table });
        }

        let store = Self {
            path,
            table: Table::default(),
        };
        store.persist()?;
        tracing::info!(path = %store.path.display(), "Created empty player store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn next_id(&self) -> u64 {
        self.table.players.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn persist(&self) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, &self.table)
                .map_err(|e| StoreError::Io(e.into()))?;
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn create(&mut self, fields: &HashMap<String, String>) -> Result<Player, StoreError> {
        let new = NewPlayer::from_fields(fields)?;
        let player = Player::from_new(self.next_id(), new);

        self.table.players.push(player.clone());
        if let Err(e) = self.persist() {
            self.table.players.pop();
            return Err(e);
        }

        tracing::debug!(id = player.id, name = %player.name, "Player persisted");
        Ok(player)
    }

    fn list_all(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.table.players.clone())
    }
}
