//! Crate-wide error type.
//!
//! Only failures that make a whole catalog, server or request unusable are
//! represented here. Per-file tag problems are ordinary values
//! (`tags::TagOutcome`) and never surface as errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A catalog id that is not valid base64 or does not decode to UTF-8.
    #[error("malformed song identifier")]
    MalformedIdentifier,

    #[error("no such song: {0}")]
    NoSuchSong(String),

    #[error("song file not found: {}", .0.display())]
    SongLoading(PathBuf),

    /// Startup cannot proceed: bad root folder, art server cannot bind, ...
    #[error("initialization failed: {0}")]
    InitializationFailed(String),

    #[error("provider is not initialized")]
    NotInitialized,

    #[error("initialization was cancelled")]
    Cancelled,

    #[error("playback error: {0}")]
    Playback(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
