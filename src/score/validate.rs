//! Score Submission Validation
//!
//! Ordered checks applied to a submission before it may touch any
//! leaderboard. Any failure aborts the invocation with no state change.
//!
//! The anti-cheat signature check is an injectable capability: the engine
//! mandates no concrete algorithm, the host wires in whatever verifier its
//! deployment uses. The default accepts everything.

use tracing::warn;

use crate::contract::Error;
use crate::core::ids::PlayerId;
use crate::tournament::{Tournament, TournamentStatus};

/// Anti-cheat capability hook.
pub trait ScoreVerifier {
    /// Should this submission be accepted?
    fn verify(
        &self,
        player: &PlayerId,
        score: u32,
        timestamp: u64,
        signature: Option<&[u8]>,
    ) -> bool;
}

/// Default verifier that accepts every submission.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAllVerifier;

impl ScoreVerifier for AcceptAllVerifier {
    fn verify(&self, _: &PlayerId, _: u32, _: u64, _: Option<&[u8]>) -> bool {
        true
    }
}

/// Validate a submission against its tournament.
///
/// Caller identity has already been checked by the entry point (that check
/// comes first in the submission order). Here, in order:
///
/// 1. the tournament must be effectively `Active` and the timestamp inside
///    its window;
/// 2. the timestamp must be strictly greater than the player's last accepted
///    one for this tournament (rejects replay of an old signed submission);
/// 3. the verifier hook must accept.
pub fn validate_submission(
    tournament: &Tournament,
    now: u64,
    player: &PlayerId,
    score: u32,
    timestamp: u64,
    signature: Option<&[u8]>,
    verifier: &dyn ScoreVerifier,
) -> Result<(), Error> {
    if tournament.effective_status(now) != TournamentStatus::Active {
        return Err(Error::TournamentNotActive);
    }
    if timestamp < tournament.start_time || timestamp > tournament.end_time {
        return Err(Error::TournamentNotActive);
    }

    if let Some(last) = tournament.last_accepted(player) {
        if timestamp <= last {
            warn!(
                player = %hex::encode(&player.0[..4]),
                tournament = tournament.id,
                timestamp,
                last,
                "replayed or out-of-order submission rejected"
            );
            return Err(Error::DuplicateOrReplayedSubmission);
        }
    }

    if !verifier.verify(player, score, timestamp, signature) {
        warn!(
            player = %hex::encode(&player.0[..4]),
            tournament = tournament.id,
            "submission failed signature verification"
        );
        return Err(Error::Unauthorized);
    }

    Ok(())
}
