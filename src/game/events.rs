//! Game Events
//!
//! Events generated during an invocation, observable by external indexers.
//! Modeled as an append-only per-invocation list: there are no subscribers
//! to notify inside this environment, the queue is simply part of the
//! invocation's output.

use serde::{Deserialize, Serialize};

use crate::core::ids::{GameId, PlayerId, TournamentId};
use crate::world::entity::EntityId;

/// Event data for one observable state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An entity was created.
    EntitySpawned {
        /// Handle of the new entity.
        id: EntityId,
    },

    /// An entity was destroyed (explicitly or by lethal damage).
    EntityDespawned {
        /// Handle that is no longer valid.
        id: EntityId,
    },

    /// A score passed validation and was recorded.
    ScoreSubmitted {
        /// Submitting player.
        player: PlayerId,
        /// Tournament the score was submitted to.
        tournament_id: TournamentId,
        /// The accepted score.
        score: u32,
        /// 1-based rank on the tournament leaderboard at insertion time.
        rank: u32,
    },

    /// A tournament was created.
    TournamentCreated {
        /// New tournament id.
        id: TournamentId,
        /// Game the tournament belongs to.
        game_id: GameId,
    },

    /// A tournament was closed by its creator.
    TournamentClosed {
        /// Closed tournament id.
        id: TournamentId,
    },
}
