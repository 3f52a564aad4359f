//! Error Taxonomy
//!
//! Every failure surfaces to the caller as one of these distinct codes, and
//! aborts the invocation with no partial state change. There is no internal
//! retry and no local recovery: the caller resubmits a new invocation.

use thiserror::Error;

/// Engine errors.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Unknown entity index, or a generation that no longer matches its slot.
    #[error("unknown entity index or generation")]
    InvalidEntity,
    /// Operation on a despawned entity.
    #[error("entity is dead")]
    EntityDead,
    /// Caller does not match the required identity.
    #[error("caller is not authorized")]
    Unauthorized,
    /// Submission timestamp is not strictly greater than the last accepted one.
    #[error("duplicate or replayed submission")]
    DuplicateOrReplayedSubmission,
    /// No tournament with this id.
    #[error("tournament not found")]
    TournamentNotFound,
    /// Tournament is outside its active window.
    #[error("tournament is not active")]
    TournamentNotActive,
    /// A required name was empty.
    #[error("name cannot be empty")]
    NameCannotBeEmpty,
    /// Capacity bound violated where it is a hard precondition.
    #[error("capacity exceeded")]
    CapacityExceeded,
    /// Time parameters are not ordered, or lie in the past.
    #[error("invalid time range")]
    InvalidTimeRange,
    /// Persistent state could not be encoded or decoded.
    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Stable numeric code for host environments that surface errors as u32.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidEntity => 1,
            Error::EntityDead => 2,
            Error::Unauthorized => 3,
            Error::DuplicateOrReplayedSubmission => 4,
            Error::TournamentNotFound => 5,
            Error::TournamentNotActive => 6,
            Error::NameCannotBeEmpty => 7,
            Error::CapacityExceeded => 8,
            Error::InvalidTimeRange => 9,
            Error::Storage(_) => 10,
        }
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
