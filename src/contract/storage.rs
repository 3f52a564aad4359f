//! Partitioned Persistent Store
//!
//! The contract's persisted state, logically partitioned per module. Every
//! key starts with a partition tag byte, so keys from different modules can
//! never collide by construction. Values are bincode-encoded partition
//! payloads; an ordered map backs the cells so iteration (and therefore the
//! state hash) is deterministic.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::contract::Error;
use crate::core::codec;
use crate::core::ids::{GameId, PlayerId, TournamentId};

/// Typed key into the persistent store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum StoreKey {
    /// The entity world (registry, component stores, resources).
    WorldState,
    /// Monotonic counter backing tournament id allocation.
    TournamentCounter,
    /// One tournament, with its leaderboard.
    Tournament(TournamentId),
    /// Ordered list of every tournament id ever created.
    TournamentIndex,
    /// Global per-game leaderboard.
    GlobalLeaderboard(GameId),
    /// Per-player submission history.
    PlayerHistory(PlayerId),
}

impl StoreKey {
    /// Encode to bytes: a leading partition tag, then the id, if any.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        match self {
            StoreKey::WorldState => bytes.push(0x01),
            StoreKey::TournamentCounter => bytes.push(0x02),
            StoreKey::Tournament(id) => {
                bytes.push(0x03);
                codec::put_u64(&mut bytes, *id);
            }
            StoreKey::TournamentIndex => bytes.push(0x04),
            StoreKey::GlobalLeaderboard(game_id) => {
                bytes.push(0x05);
                bytes.extend_from_slice(game_id.as_bytes());
            }
            StoreKey::PlayerHistory(player_id) => {
                bytes.push(0x06);
                bytes.extend_from_slice(player_id.as_bytes());
            }
        }
        bytes
    }
}

/// The contract's persistent key/value cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    cells: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and decode a partition. `Ok(None)` when the cell is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, Error> {
        match self.cells.get(&key.encode()) {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode and persist a partition.
    pub fn set<T: Serialize>(&mut self, key: &StoreKey, value: &T) -> Result<(), Error> {
        let bytes = bincode::serialize(value)?;
        let _ = self.cells.insert(key.encode(), bytes);
        Ok(())
    }

    /// Delete a cell. Returns whether it existed.
    pub fn remove(&mut self, key: &StoreKey) -> bool {
        self.cells.remove(&key.encode()).is_some()
    }

    /// Does the cell exist?
    pub fn contains(&self, key: &StoreKey) -> bool {
        self.cells.contains_key(&key.encode())
    }

    /// Iterate raw cells in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.cells
            .iter()
            .map(|(key, value)| (key.as_slice(), value.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_tags_never_collide() {
        // Same id bytes under different partitions still differ.
        let tournament = StoreKey::Tournament(7).encode();
        let mut fake = vec![0x05];
        fake.extend_from_slice(&7u64.to_be_bytes());
        assert_ne!(tournament[0], fake[0]);

        let keys = [
            StoreKey::WorldState.encode(),
            StoreKey::TournamentCounter.encode(),
            StoreKey::Tournament(0).encode(),
            StoreKey::TournamentIndex.encode(),
            StoreKey::GlobalLeaderboard(String::new()).encode(),
            StoreKey::PlayerHistory(PlayerId::default()).encode(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_roundtrip() {
        let mut store = Store::new();
        let key = StoreKey::TournamentCounter;

        assert_eq!(store.get::<u64>(&key).unwrap(), None);
        store.set(&key, &41u64).unwrap();
        assert_eq!(store.get::<u64>(&key).unwrap(), Some(41));

        store.set(&key, &42u64).unwrap();
        assert_eq!(store.get::<u64>(&key).unwrap(), Some(42));
    }

    #[test]
    fn test_remove() {
        let mut store = Store::new();
        let key = StoreKey::Tournament(3);
        store.set(&key, &"payload").unwrap();

        assert!(store.contains(&key));
        assert!(store.remove(&key));
        assert!(!store.remove(&key));
        assert!(!store.contains(&key));
    }

    #[test]
    fn test_decode_mismatch_is_an_error() {
        let mut store = Store::new();
        let key = StoreKey::TournamentCounter;
        // A 3-byte cell cannot decode as a u64 counter.
        store.set(&key, &[1u8, 2, 3]).unwrap();

        assert!(matches!(store.get::<u64>(&key), Err(Error::Storage(_))));
    }

    #[test]
    fn test_iteration_is_ordered() {
        let mut store = Store::new();
        store.set(&StoreKey::Tournament(2), &2u8).unwrap();
        store.set(&StoreKey::WorldState, &0u8).unwrap();
        store.set(&StoreKey::Tournament(1), &1u8).unwrap();

        let keys: Vec<Vec<u8>> = store.iter().map(|(k, _)| k.to_vec()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }
}
