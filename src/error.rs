//! Error types for the catalog, the persistent store, the score book and
//! the engine handle.
//!
//! None of these are fatal: catalog failures surface as a retryable load
//! state, corrupt stored scores read as an empty list, and a closed engine
//! channel only means the engine has shut down.

use thiserror::Error;

/// Failures fetching or decoding the card catalog.
///
/// `Clone` so a single failed attempt can be delivered to every caller that
/// was waiting on it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog request failed with HTTP status {status}")]
    Http { status: u16 },

    #[error("catalog transport error: {0}")]
    Transport(String),

    #[error("catalog response could not be parsed: {0}")]
    Parse(String),

    #[error("catalog fetch was abandoned before completing")]
    Abandoned,
}

/// Failures reading or writing the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Failures in the high-score and player-name book.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("player name must not be blank")]
    BlankPlayerName,
}

/// Failures talking to a running engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine command channel closed")]
    CommandChannelClosed,

    #[error("engine reply channel closed")]
    ReplyChannelClosed(#[source] tokio::sync::oneshot::error::RecvError),

    #[error("engine stopped")]
    Stopped,
}

/// Failures in a game session, which drives both the engine and the score book.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type ScoreResult<T> = std::result::Result<T, ScoreError>;
pub type EngineResult<T> = std::result::Result<T, EngineError>;
pub type SessionResult<T> = std::result::Result<T, SessionError>;
