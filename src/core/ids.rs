//! Identity Types
//!
//! Stable identifiers shared by the entity and scoring subsystems.
//! `PlayerId` implements `Ord` so it can key `BTreeMap`s with deterministic
//! iteration order.

use serde::{Deserialize, Serialize};

use super::hash::StateHasher;

/// Identifier of a registered game (registration itself lives outside this
/// engine).
pub type GameId = String;

/// Tournament identifier, minted by the engine from a monotonic counter.
pub type TournamentId = u64;

/// Unique player identifier (UUID as bytes).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct PlayerId(pub [u8; 16]);

impl PlayerId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create from UUID string.
    pub fn from_uuid_str(s: &str) -> Option<Self> {
        uuid::Uuid::parse_str(s).ok().map(|u| Self(*u.as_bytes()))
    }

    /// Convert to UUID string.
    pub fn to_uuid_string(&self) -> String {
        uuid::Uuid::from_bytes(self.0).to_string()
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Derive a deterministic PlayerId from an external auth subject.
    ///
    /// Uses SHA-256 with a domain prefix to map the host environment's
    /// identity string onto a 16-byte id.
    pub fn from_subject(subject: &str) -> Self {
        let mut hasher = StateHasher::for_player_id();
        hasher.update_bytes(subject.as_bytes());
        let hash = hasher.finalize();

        let mut id = [0u8; 16];
        id.copy_from_slice(&hash[..16]);
        Self(id)
    }
}
