//! Error types for seed queue operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while operating on a seed queue.
#[derive(Debug, Error)]
pub enum QueueError {
    /// `dequeue`/`fetch` was called on an empty queue.
    #[error("queue is empty")]
    Empty,

    /// A round-robin finger fell outside `[0, count)`.
    #[error("invalid finger {finger} for count {count}")]
    InvalidFinger { finger: usize, count: usize },

    /// `FileQueue::load` was pointed at a directory that does not exist.
    #[error("queue directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// `DurableQueue::remove` was called with an element that does not
    /// match the slot at the given index.
    #[error("element at index {index} does not match the value passed to remove")]
    ElementMismatch { index: usize },

    /// A filesystem operation failed.
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    /// A `SeedCodec` failed to encode or decode a payload.
    #[error("codec error: {0}")]
    Codec(String),
}

impl QueueError {
    /// Returns `true` for errors that indicate state corruption rather than
    /// an ordinary call-site or I/O condition.
    #[inline]
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidFinger { .. } | Self::ElementMismatch { .. }
        )
    }

    /// Returns `true` for errors that originated from the filesystem.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::DirectoryNotFound(_))
    }
}
