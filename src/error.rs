use crate::id::GameId;
use thiserror::Error;

/// Failures reported by a [`GameStore`](crate::GameStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormationError {
    /// Fatal for the session; only a new `load` recovers.
    #[error("failed to load game {game}: {source}")]
    Load {
        game: GameId,
        #[source]
        source: StoreError,
    },

    /// The partition is kept as it was, so `confirm` can simply be retried.
    #[error("failed to commit formation for game {game}: {source}")]
    Commit {
        game: GameId,
        #[source]
        source: StoreError,
    },

    #[error("formation is not ready (currently {0})")]
    NotReady(&'static str),
}
