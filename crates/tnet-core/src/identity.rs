//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers used across the Tokennet Stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `PlaceId` where a `TransitionId` is expected, even though both wrap a
//! small index.
//!
//! Place and transition ids are indices into the immutable topology tables
//! of one net. Game ids are random UUIDs naming one live net instance.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Index of a place within a net's place table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(pub usize);

/// Index of a transition within a net's transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransitionId(pub usize);

/// Unique identifier for one live game (one evolving marking).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl PlaceId {
    /// Access the raw table index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl TransitionId {
    /// Access the raw table index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl GameId {
    /// Generate a new random game identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "place:{}", self.0)
    }
}

impl std::fmt::Display for TransitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transition:{}", self.0)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game:{}", self.0)
    }
}
