//! Player entity and creation payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::StoreError;

pub const DEFAULT_WIN_MSG: &str = "You win!";
pub const DEFAULT_LOSE_MSG: &str = "You lose!";

/// A persisted player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Store-assigned, immutable after creation.
    pub id: u64,
    pub name: String,
    pub win_msg: String,
    pub lose_msg: String,
    pub wins: u32,
    pub losses: u32,
}

impl Player {
    /// Build the persisted form of `new` under the given id.
    pub fn from_new(id: u64, new: NewPlayer) -> Self {
        Self {
            id,
            name: new.name,
            win_msg: new.win_msg,
            lose_msg: new.lose_msg,
            wins: 0,
            losses: 0,
        }
    }

    /// Count one win and return the player's win message.
    pub fn record_win(&mut self) -> &str {
        self.wins = self.wins.saturating_add(1);
        &self.win_msg
    }

    /// Count one loss and return the player's lose message.
    pub fn record_loss(&mut self) -> &str {
        self.losses = self.losses.saturating_add(1);
        &self.lose_msg
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Win Message: {}", self.win_msg)?;
        writeln!(f, "Lose Message: {}", self.lose_msg)?;
        writeln!(f, "Wins: {}, Losses: {}", self.wins, self.losses)
    }
}

/// Fields accepted when creating a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub win_msg: String,
    pub lose_msg: String,
}

impl NewPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            win_msg: DEFAULT_WIN_MSG.to_string(),
            lose_msg: DEFAULT_LOSE_MSG.to_string(),
        }
    }

    /// Validate a submitted field mapping.
    ///
    /// Only `name`, `win_msg` and `lose_msg` are settable. Ids and counters
    /// belong to the store.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, StoreError> {
        if let Some(key) = fields
            .keys()
            .find(|k| !matches!(k.as_str(), "name" | "win_msg" | "lose_msg"))
        {
            return Err(StoreError::InvalidField(key.clone()));
        }

        let name = fields.get("name").ok_or(StoreError::MissingField("name"))?;
        let mut player = Self::new(name.clone());
        if let Some(msg) = fields.get("win_msg") {
            player.win_msg = msg.clone();
        }
        if let Some(msg) = fields.get("lose_msg") {
            player.lose_msg = msg.clone();
        }
        Ok(player)
    }
}

/// Render a listing: one block per player, blocks separated by a blank line.
pub fn format_listing(players: &[Player]) -> String {
    players
        .iter()
        .map(Player::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
