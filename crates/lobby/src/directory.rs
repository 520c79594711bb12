use async_trait::async_trait;
use parlor_core::ID;
use parlor_core::Player;
use parlor_core::Unique;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// External player-account lookup.
///
/// Accounts are owned elsewhere; the lobby only reads snapshots for
/// display. A missing id is not an error — views fall back to an
/// anonymous placeholder.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn lookup(&self, id: ID<Player>) -> Option<Player>;
}

/// In-memory directory for tests and single-node deployments.
pub struct Roster {
    players: RwLock<HashMap<ID<Player>, Player>>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }
    pub async fn enroll(&self, player: Player) {
        self.players.write().await.insert(player.id(), player);
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Directory for Roster {
    async fn lookup(&self, id: ID<Player>) -> Option<Player> {
        self.players.read().await.get(&id).cloned()
    }
}
