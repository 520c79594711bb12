//! Core type aliases, traits, and identity types for parlor.
//!
//! This crate provides the foundational types shared across the parlor
//! workspace: typed identifiers, the external player snapshot, and the
//! traits the other crates hang their plumbing on.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Leaderboard points carried on the external player snapshot.
pub type Points = i64;
/// Turn counter: advances once per completed turn or round.
pub type Turns = u32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and simulation.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
///
/// All caller identities cross the boundary as `ID<Player>`, so identity
/// comparison is always strict equality over the canonical uuid — no
/// representation-dependent comparisons survive past the edge.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    /// Useful for converting between marker types.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(Self::from)
    }
}

impl<T> Arbitrary for ID<T> {
    fn random() -> Self {
        Self::from(uuid::Uuid::new_v4())
    }
}

// ============================================================================
// PLAYER SNAPSHOT
// ============================================================================
/// Read-only snapshot of an externally-owned player account.
///
/// Games never own account data. They hold `ID<Player>` references and,
/// when rendering, a denormalized copy of this snapshot supplied by the
/// player directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    id: ID<Player>,
    username: String,
    points: Points,
}

impl Player {
    pub fn new(id: ID<Player>, username: impl Into<String>, points: Points) -> Self {
        Self {
            id,
            username: username.into(),
            points,
        }
    }
    /// Placeholder snapshot for an id the directory cannot resolve.
    pub fn unknown(id: ID<Player>) -> Self {
        Self::new(id, "unknown", 0)
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn points(&self) -> Points {
        self.points
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn id_equality_is_representation_free() {
        let uuid = uuid::Uuid::new_v4();
        let a: ID<Marker> = ID::from(uuid);
        let b: ID<Marker> = ID::from(uuid);
        assert_eq!(a, b);
        assert_ne!(a, ID::<Marker>::default());
    }

    #[test]
    fn id_cast_preserves_uuid() {
        let id: ID<Marker> = ID::default();
        let cast: ID<Player> = id.cast();
        assert_eq!(id.inner(), cast.inner());
    }

    #[test]
    fn id_serde_round_trip() {
        let id: ID<Player> = ID::default();
        let json = serde_json::to_string(&id).unwrap();
        let back: ID<Player> = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn unknown_player_keeps_id() {
        let id = ID::random();
        let player = Player::unknown(id);
        assert_eq!(player.id(), id);
        assert_eq!(player.username(), "unknown");
    }
}
