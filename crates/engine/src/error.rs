//! Staging errors
//!
//! Rejections happen before any I/O and are also logged as warnings, so a
//! caller that ignores them still gets the non-fatal behavior of a
//! dropped request.

use slotsave_core::SlotError;
use thiserror::Error;

/// Reasons a staging operation was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StagingError {
    /// `init` has not completed yet
    #[error("Staging manager is not initialized")]
    NotInitialized,

    /// Slot number outside the configured range
    #[error(transparent)]
    Slot(#[from] SlotError),
}
