//! Core deterministic primitives.
//!
//! Everything in this module is designed for byte-identical behavior across
//! execution environments. These types form the foundation the rest of the
//! engine is built on.

pub mod codec;
pub mod hash;
pub mod ids;

// Re-export core types
pub use hash::{StateHash, StateHasher};
pub use ids::{GameId, PlayerId, TournamentId};
