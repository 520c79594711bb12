use super::*;
use async_trait::async_trait;
use parlor_core::ID;
use parlor_core::Unique;
use parlor_engine::Game;
use parlor_engine::Kind;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory JSON document store.
///
/// Records are kept as serialized documents, so every load exercises the
/// same round trip a remote document store would. The version check in
/// [`save`](GameStore::save) runs under the write lock, making the
/// compare-and-swap atomic.
pub struct MemoryStore {
    documents: RwLock<HashMap<ID<Game>, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
    fn encode(game: &Game) -> serde_json::Value {
        serde_json::to_value(game).expect("serialize game record")
    }
    fn decode(document: &serde_json::Value) -> Game {
        serde_json::from_value(document.clone()).expect("deserialize game record")
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn load(&self, id: ID<Game>) -> Result<Game, StoreError> {
        self.documents
            .read()
            .await
            .get(&id)
            .map(Self::decode)
            .ok_or(StoreError::NotFound)
    }
    async fn save(&self, game: &Game) -> Result<Game, StoreError> {
        let mut documents = self.documents.write().await;
        match documents.get(&game.id()).map(Self::decode) {
            Some(stored) if stored.version() != game.version() => {
                log::debug!(
                    "[store] stale write on game {}: stored v{}, caller v{}",
                    game.id(),
                    stored.version(),
                    game.version()
                );
                Err(StoreError::VersionConflict)
            }
            None if game.version() > 0 => Err(StoreError::NotFound),
            _ => {
                let mut stored = game.clone();
                stored.bump();
                documents.insert(stored.id(), Self::encode(&stored));
                log::debug!("[store] saved game {} at v{}", stored.id(), stored.version());
                Ok(stored)
            }
        }
    }
    async fn list(&self, kind: Kind) -> Result<Vec<Game>, StoreError> {
        let mut games = self
            .documents
            .read()
            .await
            .values()
            .map(Self::decode)
            .filter(|game| game.kind() == kind)
            .collect::<Vec<_>>();
        // uuid v7 ids order by creation time
        games.sort_by_key(|game| game.id());
        Ok(games)
    }
    async fn delete(&self, id: ID<Game>) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
