//! SlotSave - slot-indexed save data for applications
//!
//! Persists one application record per numbered slot under a namespace
//! directory. Every overwrite first copies the previous save to a backup
//! file, and a load that finds a damaged primary falls back to that backup.
//!
//! # Quick Start
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use slotsave::{CopyAllFold, Record, SaveConfig, StagingManager};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct Progress {
//!     level: u32,
//! }
//!
//! impl Record for Progress {}
//!
//! let config = SaveConfig::new("saves").with_namespace("Game").with_max_index(3);
//! let mut manager = StagingManager::<Progress, _>::new(config, CopyAllFold);
//! manager.init()?;
//!
//! manager.edit_staged(|p| p.level = 4)?;
//! let done = manager.save(1)?;
//! assert!(done.is_success());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - `slotsave-core`: record contract, slot indices, formats, configuration
//! - `slotsave-durability`: codecs, slot paths, the file-backed record store
//! - `slotsave-engine`: staging manager, hooks, per-type registry
//!
//! Applications normally work with [`StagingManager`]; [`RecordStore`] is
//! available for callers that manage record copies themselves.

pub use slotsave_core::{
    ConfigError, InitError, Record, SaveConfig, SaveFormat, SlotError, SlotIndex, CONFIG_FILE_NAME,
    MAX_SLOT_COUNT,
};
pub use slotsave_durability::{
    CodecError, Completion, EventBus, RecordStore, SlotPaths, SlotRecorder, Subscription,
};
pub use slotsave_engine::{
    global_registry, CopyAllFold, ManagerRegistry, SharedManager, StagingError, StagingHooks,
    StagingManager,
};
