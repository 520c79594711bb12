//! Game record persistence.
//!
//! The lifecycle layer runs against the [`GameStore`] abstraction and
//! never sees how records are kept. Writes are conditional: a save
//! succeeds only while the stored version still matches the copy the
//! caller read, which is what keeps two simultaneous moves against the
//! same record from both landing.
//!
//! [`MemoryStore`] is the in-process document-store implementation used
//! by tests and single-node deployments.
mod memory;

pub use memory::*;

use async_trait::async_trait;
use parlor_core::ID;
use parlor_engine::Game;
use parlor_engine::Kind;

/// Errors from the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No document under that game id.
    NotFound,
    /// The stored version moved since the caller read the record;
    /// retryable by re-reading.
    VersionConflict,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "game record not found"),
            Self::VersionConflict => write!(f, "stale game record version"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Async store interface for game records.
///
/// `save` is a compare-and-swap: the write lands only if the stored
/// record's version equals the version on the copy being saved, and the
/// stored version advances on every successful write.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Fetches the current record.
    async fn load(&self, id: ID<Game>) -> Result<Game, StoreError>;
    /// Conditionally writes the record; returns the stored copy with its
    /// advanced version.
    async fn save(&self, game: &Game) -> Result<Game, StoreError>;
    /// All records of one kind.
    async fn list(&self, kind: Kind) -> Result<Vec<Game>, StoreError>;
    /// Removes the record.
    async fn delete(&self, id: ID<Game>) -> Result<(), StoreError>;
}
