//! # Chainplay Engine
//!
//! Deterministic on-chain game state engine: an entity/component world plus
//! a tournament/leaderboard subsystem with authenticated score submissions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CHAINPLAY ENGINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/         - Deterministic primitives                    │
//! │  ├── codec.rs  - Big-endian fixed-layout byte codec          │
//! │  ├── hash.rs   - SHA-256 state hashing for verification      │
//! │  └── ids.rs    - Player / game / tournament identifiers      │
//! │                                                              │
//! │  world/        - Entity/component world                      │
//! │  ├── entity.rs - Generational slot arena                     │
//! │  ├── component.rs - Type tags and byte layouts               │
//! │  └── storage.rs - Table (dense) and sparse backends          │
//! │                                                              │
//! │  game/         - Pure deterministic systems                  │
//! │  ├── movement.rs - Clamped position updates                  │
//! │  ├── combat.rs - Saturating damage and healing               │
//! │  └── events.rs - Per-invocation event queue                  │
//! │                                                              │
//! │  score/        - Ranking engine                              │
//! │  ├── leaderboard.rs - Bounded sorted rankings                │
//! │  ├── history.rs - Capped per-player history                  │
//! │  └── validate.rs - Submission checks + anti-cheat hook       │
//! │                                                              │
//! │  tournament/   - Time-boxed scoring lifecycle                │
//! │  contract/     - Entry points, errors, partitioned storage   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The engine is **100% deterministic**:
//! - No floating-point arithmetic; all game math is integer and saturating
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time: ledger time arrives as an explicit input
//! - Fixed-layout big-endian byte encodings for component data
//!
//! Given the same invocation sequence, the engine produces **identical
//! state digests** on any platform.
//!
//! ## Execution Model
//!
//! One logical thread per invocation, serialized by the surrounding ledger.
//! Each entry point is atomic: every failure discards all of the
//! invocation's writes, so partial updates are never observable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod contract;
pub mod core;
pub mod game;
pub mod score;
pub mod tournament;
pub mod world;

// Re-export commonly used types
pub use contract::{CallContext, Error, GameContract};
pub use self::core::ids::{GameId, PlayerId, TournamentId};
pub use game::{CombatSystem, GameEvent, MovementSystem};
pub use score::{Leaderboard, LeaderboardEntry, PlayerHistory, ScoreVerifier};
pub use tournament::{Tournament, TournamentStatus};
pub use world::{EntityId, Health, Position, World};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Health every entity starts with.
pub const STARTING_HEALTH: u32 = 100;

/// Damage dealt by the standard attack.
pub const ATTACK_DAMAGE: u32 = 10;

/// Largest leaderboard page a single query returns.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Entries retained on a game's global leaderboard.
pub const GLOBAL_LEADERBOARD_CAP: u32 = 1000;

/// Submissions retained per player history.
pub const PLAYER_HISTORY_CAP: u32 = 100;

/// Upper bound on a tournament's configured entry capacity.
pub const MAX_TOURNAMENT_ENTRIES: u32 = 10_000;
