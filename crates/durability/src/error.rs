//! Store operation errors
//!
//! These never escape a save, load or delete as a hard failure. The store
//! logs them and turns them into the completion string (save/delete) or an
//! absent record (load).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::codec::CodecError;

/// Result type alias for store internals
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised while operating on slot files
#[derive(Debug, Error)]
pub enum StoreError {
    /// Operation issued before `initialize`
    #[error("Save store is not initialized")]
    NotInitialized,

    /// Slot index beyond the configured slot count
    #[error("Slot {slot} is outside the {max_index} configured slots")]
    SlotOutOfRange {
        /// 0-based slot index
        slot: usize,
        /// Configured slot count
        max_index: usize,
    },

    /// Filesystem failure on a slot file
    #[error("Failed to {action} {path}: {source}")]
    Io {
        /// What the store was doing
        action: &'static str,
        /// File involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Record could not be encoded or decoded
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl StoreError {
    /// Create an I/O error for a file
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// True if this is a decode failure (as opposed to I/O)
    pub fn is_decode(&self) -> bool {
        matches!(self, StoreError::Codec(CodecError::Decode { .. }))
    }
}
