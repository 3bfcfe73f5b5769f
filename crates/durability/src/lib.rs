//! Durability layer for SlotSave
//!
//! This crate handles everything that touches disk:
//!
//! - Codecs: JSON (text) and bincode (binary) record encodings
//! - Paths: primary/backup/temp file layout per slot
//! - Writer: crash-safe temp-file-and-rename replacement of slot files
//! - Store: save/load/delete with backup-before-overwrite and
//!   fallback-on-corruption, reporting through completion channels
//! - Bus: the completion channels themselves

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bus; // Completion notification channels
pub mod codec; // Record encodings
pub mod error; // Store operation errors
pub mod outcome; // Per-call completion results
pub mod paths; // Slot file layout
pub mod store; // RecordStore and the SlotRecorder trait
pub mod writer; // Crash-safe file replacement

// === Re-exports ===
pub use bus::{EventBus, Subscription};
pub use codec::{codec_for, BincodeCodec, CodecError, JsonCodec, RecordCodec, MAX_RECORD_SIZE};
pub use error::{StoreError, StoreResult};
pub use outcome::Completion;
pub use paths::{SlotPaths, BACKUP_SUFFIX, BASE_FILE_NAME};
pub use store::{RecordStore, SlotRecorder};
