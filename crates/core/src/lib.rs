//! Core types and traits for SlotSave
//!
//! This crate defines the foundational types shared by the store and the
//! staging layer:
//! - Record: the contract an application save-data type implements
//! - SlotIndex: validated, 0-based slot address
//! - SaveFormat: text or binary on-disk representation
//! - SaveConfig: initialization-time configuration (TOML loadable)
//! - Error types: InitError, ConfigError, SlotError

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod format;
pub mod record;
pub mod slot;

pub use config::{ConfigError, SaveConfig, CONFIG_FILE_NAME, DEFAULT_NAMESPACE};
pub use error::InitError;
pub use format::{ParseFormatError, SaveFormat};
pub use record::Record;
pub use slot::{SlotError, SlotIndex, MAX_SLOT_COUNT};
