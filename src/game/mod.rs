//! Game Logic Module
//!
//! Deterministic systems and the events they emit. Systems are pure
//! functions over component values; all lifecycle decisions (despawning a
//! dead entity, counting the dead) belong to the contract entry points.
//!
//! ## Module Structure
//!
//! - `movement`: position updates, teleports, distances
//! - `combat`: damage, healing, alive/dead predicates
//! - `events`: per-invocation event queue entries

pub mod combat;
pub mod events;
pub mod movement;

// Re-export key types
pub use combat::CombatSystem;
pub use events::GameEvent;
pub use movement::MovementSystem;
