//! In-process record store.

use std::collections::HashMap;

use super::{NewPlayer, Player, RecordStore, StoreError};

/// Vec-backed store. Contents live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            next_id: 1,
        }
    }

    /// Insert a validated record directly.
    pub fn insert(&mut self, new: NewPlayer) -> Player {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let player = Player::from_new(id, new);
        self.players.push(player.clone());
        player
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn create(&mut self, fields: &HashMap<String, String>) -> Result<Player, StoreError> {
        let new = NewPlayer::from_fields(fields)?;
        Ok(self.insert(new))
    }

    fn list_all(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_assigned_in_order() {
        let mut store = MemoryStore::new();
        let a = store.insert(NewPlayer::new("Kate"));
        let b = store.insert(NewPlayer::new("Elisha"));
        assert_eq!((a.id, b.id), (1, 2));

        let names: Vec<_> = store.list_all().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Kate", "Elisha"]);
    }

    #[test]
    fn test_default_store_starts_at_one() {
        let mut store = MemoryStore::default();
        assert!(store.is_empty());
        assert_eq!(store.insert(NewPlayer::new("Wei-Liang")).id, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let mut store = MemoryStore::new();
        let mut fields = HashMap::new();
        fields.insert("losses".to_string(), "3".to_string());
        fields.insert("name".to_string(), "Kate".to_string());

        assert!(store.create(&fields).is_err());
        assert!(store.is_empty());
    }
}
