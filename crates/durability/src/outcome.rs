//! Per-call completion results

use slotsave_core::SlotIndex;

/// Result of a save or delete
///
/// Mirrors the save/delete notification payload: an empty error string
/// means success, anything else describes the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Slot the operation targeted
    pub slot: SlotIndex,
    /// Empty on success, otherwise a description of the failure
    pub error: String,
}

impl Completion {
    /// Successful completion
    pub fn success(slot: SlotIndex) -> Self {
        Completion {
            slot,
            error: String::new(),
        }
    }

    /// Failed completion
    pub fn failure(slot: SlotIndex, error: impl Into<String>) -> Self {
        Completion {
            slot,
            error: error.into(),
        }
    }

    /// True if the operation succeeded
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }

    /// The failure description, if any
    pub fn error_message(&self) -> Option<&str> {
        if self.error.is_empty() {
            None
        } else {
            Some(&self.error)
        }
    }
}
