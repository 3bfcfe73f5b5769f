//! Slot addressing
//!
//! Callers address slots 1-based (`1..=max_index`), the way a save menu
//! numbers them. Internally every slot is a 0-based [`SlotIndex`] that is
//! only ever produced by validation, so the store can trust it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the number of slots a store can be configured with.
pub const MAX_SLOT_COUNT: usize = 10;

/// 0-based slot address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotIndex(usize);

impl SlotIndex {
    /// Wrap an already 0-based index.
    ///
    /// No range check is performed; the store rejects indices beyond its
    /// configured slot count.
    pub const fn new(index: usize) -> Self {
        SlotIndex(index)
    }

    /// Validate a 1-based, caller-facing slot number against `max_index`.
    ///
    /// Zero, negative numbers and anything above `max_index` are rejected.
    pub fn from_user(slot: i64, max_index: usize) -> Result<Self, SlotError> {
        if slot <= 0 || slot as u64 > max_index as u64 {
            return Err(SlotError::OutOfRange { slot, max_index });
        }
        Ok(SlotIndex(slot as usize - 1))
    }

    /// The 0-based index.
    pub const fn get(self) -> usize {
        self.0
    }

    /// The 1-based number shown to users.
    pub const fn user_facing(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slot validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// Slot number outside `1..=max_index`
    #[error("Slot {slot} is out of range (expected 1..={max_index})")]
    OutOfRange {
        /// Slot number supplied by the caller
        slot: i64,
        /// Configured slot count
        max_index: usize,
    },
}
