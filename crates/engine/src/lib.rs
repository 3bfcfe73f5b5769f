//! Staging engine for SlotSave
//!
//! This crate sits between the application and the slot store:
//! - StagingManager: committed / staged / default copies of the record and
//!   the save/load/delete/discard protocol over them
//! - StagingHooks: application extension points (fold, lifecycle events)
//! - ManagerRegistry: one shared manager per record type
//!
//! The manager is the only component that knows about staging; the store
//! underneath only ever sees whole committed records.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hooks;
pub mod manager;
pub mod registry;

pub use error::StagingError;
pub use hooks::{CopyAllFold, StagingHooks};
pub use manager::StagingManager;
pub use registry::{global_registry, ManagerRegistry, SharedManager};
