//! Component Storage Backends
//!
//! Two interchangeable containers hold serialized component payloads keyed
//! by entity index:
//!
//! - **Table**: a dense `Vec` indexed directly by entity index. O(1) access
//!   and fast full sweeps, at the cost of a slot per allocated entity. For
//!   near-universal components (position, health).
//! - **Sparse**: a `BTreeMap` keyed by entity index. Compact for rare
//!   components; iteration cost scales with occupancy. A `BTreeMap` rather
//!   than a hash map, so iteration order stays deterministic.
//!
//! The choice is a space/time tradeoff only. Both variants must expose
//! identical observable semantics for get/set/remove/iterate; the tests at
//! the bottom replay identical operation sequences against both and compare.
//!
//! The backend is selected once at component registration; call sites
//! dispatch on the enum, there is no per-call dynamic dispatch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Backend strategy for one component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageKind {
    /// Dense array indexed by entity index.
    Table,
    /// Associative map keyed by entity index.
    Sparse,
}

/// Storage for the payloads of one component type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ComponentStore {
    /// Dense backend.
    Table {
        /// One slot per entity index seen so far; `None` = component absent.
        slots: Vec<Option<Vec<u8>>>,
    },
    /// Sparse backend.
    Sparse {
        /// Occupied entries only.
        entries: BTreeMap<u32, Vec<u8>>,
    },
}

impl ComponentStore {
    /// Create an empty store with the given backend.
    pub fn new(kind: StorageKind) -> Self {
        match kind {
            StorageKind::Table => Self::Table { slots: Vec::new() },
            StorageKind::Sparse => Self::Sparse {
                entries: BTreeMap::new(),
            },
        }
    }

    /// Which backend this store uses.
    pub fn kind(&self) -> StorageKind {
        match self {
            Self::Table { .. } => StorageKind::Table,
            Self::Sparse { .. } => StorageKind::Sparse,
        }
    }

    /// Set the payload for an entity index, replacing any previous value.
    pub fn set(&mut self, index: u32, payload: Vec<u8>) {
        match self {
            Self::Table { slots } => {
                let i = index as usize;
                if i >= slots.len() {
                    slots.resize(i + 1, None);
                }
                slots[i] = Some(payload);
            }
            Self::Sparse { entries } => {
                let _ = entries.insert(index, payload);
            }
        }
    }

    /// Get the payload for an entity index.
    pub fn get(&self, index: u32) -> Option<&[u8]> {
        match self {
            Self::Table { slots } => slots
                .get(index as usize)
                .and_then(|slot| slot.as_deref()),
            Self::Sparse { entries } => entries.get(&index).map(Vec::as_slice),
        }
    }

    /// Remove the payload for an entity index. Returns whether one existed.
    pub fn remove(&mut self, index: u32) -> bool {
        match self {
            Self::Table { slots } => match slots.get_mut(index as usize) {
                Some(slot) => slot.take().is_some(),
                None => false,
            },
            Self::Sparse { entries } => entries.remove(&index).is_some(),
        }
    }

    /// Does this store hold a payload for the index?
    pub fn contains(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Table { slots } => slots.iter().filter(|slot| slot.is_some()).count(),
            Self::Sparse { entries } => entries.len(),
        }
    }

    /// Is the store empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate occupied entries in ascending index order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (u32, &[u8])> + '_> {
        match self {
            Self::Table { slots } => Box::new(slots.iter().enumerate().filter_map(
                |(index, slot)| slot.as_deref().map(|payload| (index as u32, payload)),
            )),
            Self::Sparse { entries } => Box::new(
                entries
                    .iter()
                    .map(|(index, payload)| (*index, payload.as_slice())),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn both() -> [ComponentStore; 2] {
        [
            ComponentStore::new(StorageKind::Table),
            ComponentStore::new(StorageKind::Sparse),
        ]
    }

    #[test]
    fn test_set_get_remove() {
        for mut store in both() {
            assert_eq!(store.get(3), None);
            store.set(3, vec![1, 2, 3]);
            assert_eq!(store.get(3), Some([1u8, 2, 3].as_slice()));
            assert!(store.contains(3));

            store.set(3, vec![9]);
            assert_eq!(store.get(3), Some([9u8].as_slice()));
            assert_eq!(store.len(), 1);

            assert!(store.remove(3));
            assert!(!store.remove(3));
            assert!(store.is_empty());
        }
    }

    #[test]
    fn test_iteration_ascending() {
        for mut store in both() {
            store.set(5, vec![5]);
            store.set(1, vec![1]);
            store.set(9, vec![9]);
            store.set(0, vec![0]);

            let order: Vec<u32> = store.iter().map(|(index, _)| index).collect();
            assert_eq!(order, vec![0, 1, 5, 9]);
        }
    }

    #[test]
    fn test_remove_out_of_range() {
        for mut store in both() {
            assert!(!store.remove(1000));
        }
    }

    /// Replay one operation sequence against both backends; observable
    /// results must be identical at every step.
    #[test]
    fn test_backend_equivalence_scripted() {
        #[derive(Clone, Copy)]
        enum Op {
            Set(u32, u8),
            Remove(u32),
            Get(u32),
        }
        use Op::*;

        let script = [
            Set(0, 10),
            Set(7, 70),
            Get(7),
            Set(7, 71),
            Remove(0),
            Get(0),
            Remove(0),
            Set(3, 30),
            Set(12, 120),
            Remove(7),
            Get(12),
        ];

        let mut table = ComponentStore::new(StorageKind::Table);
        let mut sparse = ComponentStore::new(StorageKind::Sparse);

        for op in script {
            match op {
                Set(index, byte) => {
                    table.set(index, vec![byte]);
                    sparse.set(index, vec![byte]);
                }
                Remove(index) => {
                    assert_eq!(table.remove(index), sparse.remove(index));
                }
                Get(index) => {
                    assert_eq!(table.get(index), sparse.get(index));
                }
            }
            assert_eq!(table.len(), sparse.len());
            let table_view: Vec<(u32, Vec<u8>)> =
                table.iter().map(|(i, p)| (i, p.to_vec())).collect();
            let sparse_view: Vec<(u32, Vec<u8>)> =
                sparse.iter().map(|(i, p)| (i, p.to_vec())).collect();
            assert_eq!(table_view, sparse_view);
        }
    }

    proptest! {
        /// Same as the scripted test but over arbitrary operation sequences.
        #[test]
        fn test_backend_equivalence_random(ops in proptest::collection::vec(
            (0u8..3, 0u32..32, proptest::collection::vec(any::<u8>(), 0..8)),
            0..64,
        )) {
            let mut table = ComponentStore::new(StorageKind::Table);
            let mut sparse = ComponentStore::new(StorageKind::Sparse);

            for (op, index, payload) in ops {
                match op {
                    0 => {
                        table.set(index, payload.clone());
                        sparse.set(index, payload);
                    }
                    1 => {
                        prop_assert_eq!(table.remove(index), sparse.remove(index));
                    }
                    _ => {
                        prop_assert_eq!(table.get(index), sparse.get(index));
                    }
                }
            }

            let table_view: Vec<(u32, Vec<u8>)> =
                table.iter().map(|(i, p)| (i, p.to_vec())).collect();
            let sparse_view: Vec<(u32, Vec<u8>)> =
                sparse.iter().map(|(i, p)| (i, p.to_vec())).collect();
            prop_assert_eq!(table_view, sparse_view);
        }
    }
}
