//! Player Score History
//!
//! Every accepted submission is appended to the submitting player's history,
//! even when the leaderboard itself is unchanged. The history is a bounded
//! FIFO: past the cap, the oldest record is evicted.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::ids::{GameId, TournamentId};
use crate::PLAYER_HISTORY_CAP;

/// One accepted submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// The accepted score.
    pub score: u32,
    /// Submission timestamp (ledger seconds).
    pub timestamp: u64,
    /// Game the tournament belongs to.
    pub game_id: GameId,
    /// Tournament the score was submitted to.
    pub tournament_id: TournamentId,
}

/// Bounded record of a player's own submissions across tournaments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerHistory {
    records: VecDeque<ScoreRecord>,
}

impl PlayerHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest past [`PLAYER_HISTORY_CAP`].
    pub fn push(&mut self, record: ScoreRecord) {
        self.records.push_back(record);
        while self.records.len() > PLAYER_HISTORY_CAP as usize {
            let _ = self.records.pop_front();
        }
    }

    /// Records in submission order, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter()
    }

    /// Number of retained records.
    pub fn len(&self) -> u32 {
        self.records.len() as u32
    }

    /// Is the history empty?
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest score ever retained.
    pub fn best_score(&self) -> Option<u32> {
        self.records.iter().map(|record| record.score).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: u32, timestamp: u64) -> ScoreRecord {
        ScoreRecord {
            score,
            timestamp,
            game_id: "puzzle-royale".to_string(),
            tournament_id: 1,
        }
    }

    #[test]
    fn test_push_preserves_order() {
        let mut history = PlayerHistory::new();
        history.push(record(100, 1));
        history.push(record(50, 2));

        let scores: Vec<u32> = history.records().map(|r| r.score).collect();
        assert_eq!(scores, vec![100, 50]);
        assert_eq!(history.best_score(), Some(100));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = PlayerHistory::new();
        for n in 0..PLAYER_HISTORY_CAP + 5 {
            history.push(record(n, n as u64));
        }

        assert_eq!(history.len(), PLAYER_HISTORY_CAP);
        // The first five submissions are gone.
        assert_eq!(history.records().next().map(|r| r.score), Some(5));
    }

    #[test]
    fn test_empty() {
        let history = PlayerHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.best_score(), None);
    }
}
