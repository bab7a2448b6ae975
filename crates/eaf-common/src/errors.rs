use std::path::PathBuf;

use crate::id::BufferId;
use crate::types::Size;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures of the owner-thread task queue itself. Errors raised by a
/// queued body never show up here; the owner loop only logs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("owner loop is closed")]
    LoopClosed,

    #[error("not called on the owner thread")]
    NotOwnerThread,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("buffer {0} is destroyed")]
    Destroyed(BufferId),

    #[error("invalid buffer size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("no buffer with id {0}")]
    NotFound(BufferId),

    #[error("buffer id {0} is already in use")]
    DuplicateId(BufferId),

    #[error("buffer {id} rendered a {actual} image, expected {expected}")]
    SnapshotSize {
        id: BufferId,
        expected: Size,
        actual: Size,
    },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

#[derive(Debug, thiserror::Error)]
pub enum EafError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
