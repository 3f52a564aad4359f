//! Tournament Lifecycle
//!
//! A tournament is a time-boxed scoring context owning one leaderboard.
//! There is no scheduler in this environment, so status transitions are
//! never pushed by a timer: the stored status only records creation and an
//! explicit admin close, and the *effective* status is derived lazily from
//! ledger time on every read and write.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contract::Error;
use crate::core::ids::{GameId, PlayerId, TournamentId};
use crate::score::leaderboard::Leaderboard;
use crate::MAX_TOURNAMENT_ENTRIES;

/// Lifecycle state of a tournament.
///
/// One-way: `Created → Open → Active → Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStatus {
    /// Constructed; not yet visible as open (only ever a stored state).
    Created,
    /// Announced, before `start_time`.
    Open,
    /// Inside the scoring window; submissions are accepted.
    Active,
    /// Past `end_time`, or closed by the creator.
    Closed,
}

/// A time-boxed scoring context with its own leaderboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    /// Engine-minted identifier.
    pub id: TournamentId,
    /// Game this tournament belongs to.
    pub game_id: GameId,
    /// Display name.
    pub name: String,
    /// Creator; the only identity allowed to close early.
    pub creator: PlayerId,
    /// First ledger second at which submissions are accepted.
    pub start_time: u64,
    /// Last ledger second at which submissions are accepted.
    pub end_time: u64,
    /// Leaderboard capacity for this tournament.
    pub entry_cap: u32,
    status: TournamentStatus,
    /// Ranked scores.
    pub leaderboard: Leaderboard,
    /// Last accepted submission timestamp per player, for replay rejection.
    last_submission: BTreeMap<PlayerId, u64>,
}

/// Read-only tournament metadata returned by queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentInfo {
    /// Tournament id.
    pub id: TournamentId,
    /// Game this tournament belongs to.
    pub game_id: GameId,
    /// Display name.
    pub name: String,
    /// Scoring window start.
    pub start_time: u64,
    /// Scoring window end.
    pub end_time: u64,
    /// Leaderboard capacity.
    pub entry_cap: u32,
    /// Effective status at query time.
    pub status: TournamentStatus,
    /// Current number of ranked entries.
    pub entry_count: u32,
}

impl Tournament {
    /// Validate parameters and create a tournament.
    ///
    /// Requires a non-empty name, `start_time < end_time`, both in the
    /// future (or now), and a capacity within `1..=MAX_TOURNAMENT_ENTRIES`.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: TournamentId,
        game_id: GameId,
        name: String,
        creator: PlayerId,
        start_time: u64,
        end_time: u64,
        entry_cap: u32,
        now: u64,
    ) -> Result<Self, Error> {
        if name.is_empty() {
            return Err(Error::NameCannotBeEmpty);
        }
        if start_time >= end_time || start_time < now {
            return Err(Error::InvalidTimeRange);
        }
        if entry_cap == 0 || entry_cap > MAX_TOURNAMENT_ENTRIES {
            return Err(Error::CapacityExceeded);
        }

        info!(id, game_id = %game_id, name = %name, start_time, end_time, "tournament created");

        Ok(Self {
            id,
            game_id,
            name,
            creator,
            start_time,
            end_time,
            entry_cap,
            status: TournamentStatus::Created,
            leaderboard: Leaderboard::new(entry_cap),
            last_submission: BTreeMap::new(),
        })
    }

    /// Status as of `now`.
    ///
    /// An admin close is sticky; otherwise the window decides: before
    /// `start_time` the tournament is `Open`, inside the window `Active`,
    /// past `end_time` `Closed`.
    pub fn effective_status(&self, now: u64) -> TournamentStatus {
        if self.status == TournamentStatus::Closed {
            return TournamentStatus::Closed;
        }
        if now > self.end_time {
            TournamentStatus::Closed
        } else if now >= self.start_time {
            TournamentStatus::Active
        } else {
            TournamentStatus::Open
        }
    }

    /// Is the tournament accepting submissions at `now`?
    pub fn is_active(&self, now: u64) -> bool {
        self.effective_status(now) == TournamentStatus::Active
    }

    /// Close explicitly. Caller authorization is the entry point's job.
    pub fn close(&mut self) {
        self.status = TournamentStatus::Closed;
    }

    /// Last accepted submission timestamp for a player.
    pub fn last_accepted(&self, player: &PlayerId) -> Option<u64> {
        self.last_submission.get(player).copied()
    }

    /// Record the timestamp of an accepted submission.
    pub fn record_submission_time(&mut self, player: PlayerId, timestamp: u64) {
        let _ = self.last_submission.insert(player, timestamp);
    }

    /// Metadata snapshot as of `now`.
    pub fn info(&self, now: u64) -> TournamentInfo {
        TournamentInfo {
            id: self.id,
            game_id: self.game_id.clone(),
            name: self.name.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            entry_cap: self.entry_cap,
            status: self.effective_status(now),
            entry_count: self.leaderboard.len(),
        }
    }
}
