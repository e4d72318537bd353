//! Player listing and creation.

use crate::http::{Request, Response, Status};
use crate::store::player::format_listing;
use crate::store::RecordStore;

/// `GET /players`: every stored player as plain text.
pub fn list_players(store: &dyn RecordStore) -> Response {
    match store.list_all() {
        Ok(players) => {
            tracing::debug!(count = players.len(), "Listing players");
            Response::text(Status::Ok, format_listing(&players))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list players");
            Response::internal_error()
        }
    }
}

/// `POST /players`: create a player from the form body.
pub fn create_player(store: &mut dyn RecordStore, request: &Request) -> Response {
    let fields = request.form();

    match store.create(&fields) {
        Ok(player) => {
            tracing::info!(id = player.id, name = %player.name, "Player created");
            Response::text(Status::Ok, player.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create player");
            Response::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use crate::store::{MemoryStore, NewPlayer, Player, StoreError};
    use std::collections::HashMap;

    #[derive(Debug)]
    struct UnreachableStore;

    impl RecordStore for UnreachableStore {
        fn create(&mut self, _: &HashMap<String, String>) -> Result<Player, StoreError> {
            Err(StoreError::Io(std::io::Error::other("database offline")))
        }

        fn list_all(&self) -> Result<Vec<Player>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("database offline")))
        }
    }

    #[test]
    fn test_list_empty_store() {
        let store = MemoryStore::new();
        let response = list_players(&store);
        assert_eq!(response.status, Status::Ok);
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_list_in_store_order() {
        let mut store = MemoryStore::new();
        store.insert(NewPlayer::new("Kate"));
        store.insert(NewPlayer::new("Elisha"));

        let body = String::from_utf8(list_players(&store).body).unwrap();
        let kate = body.find("Name: Kate").unwrap();
        let elisha = body.find("Name: Elisha").unwrap();
        assert!(kate < elisha);
    }

    #[test]
    fn test_create_returns_record() {
        let mut store = MemoryStore::new();
        let request = Request::new(Method::Post, "/players")
            .with_body("name=Ada&win_msg=Go&lose_msg=Oops");

        let response = create_player(&mut store, &request);
        assert_eq!(response.status, Status::Ok);
        assert_eq!(
            String::from_utf8(response.body).unwrap(),
            "Name: Ada\nWin Message: Go\nLose Message: Oops\nWins: 0, Losses: 0\n"
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_failure_is_500() {
        let mut store = UnreachableStore;
        assert_eq!(list_players(&store).status, Status::InternalServerError);

        let request = Request::new(Method::Post, "/players").with_body("name=Ada");
        let response = create_player(&mut store, &request);
        assert_eq!(response.status, Status::InternalServerError);
        assert_eq!(response.body, b"500 Internal Server Error\n");
    }

    #[test]
    fn test_create_without_body_is_500() {
        let mut store = MemoryStore::new();
        let response = create_player(&mut store, &Request::new(Method::Post, "/players"));
        assert_eq!(response.status, Status::InternalServerError);
        assert!(store.is_empty());
    }
}
