//! Leaderboard Ranking Engine
//!
//! A leaderboard is an always-sorted, capacity-bounded sequence of entries:
//! descending by score, ties broken by earlier timestamp, then by earlier
//! insertion sequence. The sequence counter is assigned at insertion time
//! and exists only so that exact score+timestamp ties resolve the same way
//! on every re-execution.
//!
//! Capacity is a deliberate lossy-retention policy bounding on-chain
//! storage growth: when an insert pushes the board over its cap, exactly
//! the lowest-ranked entry is dropped.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::core::ids::PlayerId;
use crate::MAX_PAGE_SIZE;

/// One ranked score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player who submitted the score.
    pub player_id: PlayerId,
    /// The score.
    pub score: u32,
    /// Submission timestamp (ledger seconds).
    pub timestamp: u64,
    /// Insertion sequence number; breaks exact score+timestamp ties
    /// (earlier insertion wins).
    pub seq: u64,
}

impl LeaderboardEntry {
    /// Sort key: better-ranked entries order first.
    #[inline]
    fn ranking(&self) -> (Reverse<u32>, u64, u64) {
        (Reverse(self.score), self.timestamp, self.seq)
    }
}

/// Capacity-bounded sorted ranking of scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: u32,
    next_seq: u64,
}

impl Leaderboard {
    /// Create an empty board with the given capacity.
    pub fn new(capacity: u32) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            next_seq: 0,
        }
    }

    /// Number of ranked entries.
    pub fn len(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Is the board empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// All entries, best rank first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Record an accepted score and return its 1-based rank.
    ///
    /// Best-score-kept: when the player already holds an entry, the new
    /// score replaces it only if strictly greater; otherwise the board is
    /// untouched and the player's current rank is returned. An insert that
    /// lands beyond capacity is evicted immediately; its momentary rank is
    /// still returned.
    pub fn record(&mut self, player_id: PlayerId, score: u32, timestamp: u64) -> u32 {
        if let Some(pos) = self.position_of(&player_id) {
            if score <= self.entries[pos].score {
                return pos as u32 + 1;
            }
            let _ = self.entries.remove(pos);
        }

        let entry = LeaderboardEntry {
            player_id,
            score,
            timestamp,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let idx = self
            .entries
            .partition_point(|existing| existing.ranking() < entry.ranking());
        self.entries.insert(idx, entry);

        if self.entries.len() > self.capacity as usize {
            let _ = self.entries.pop();
        }

        idx as u32 + 1
    }

    /// Current 1-based rank of a player, if ranked.
    pub fn rank_of(&self, player_id: &PlayerId) -> Option<u32> {
        self.position_of(player_id).map(|pos| pos as u32 + 1)
    }

    /// A contiguous page of the ranking.
    ///
    /// `limit` is capped at [`MAX_PAGE_SIZE`]; an offset beyond the end
    /// yields an empty page.
    pub fn page(&self, offset: u32, limit: u32) -> Vec<LeaderboardEntry> {
        let limit = limit.min(MAX_PAGE_SIZE) as usize;
        let start = offset as usize;
        if start >= self.entries.len() {
            return Vec::new();
        }
        let end = (start + limit).min(self.entries.len());
        self.entries[start..end].to_vec()
    }

    fn position_of(&self, player_id: &PlayerId) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.player_id == *player_id)
    }

    #[cfg(test)]
    fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].ranking() < pair[1].ranking())
    }
}
