//! Staging manager
//!
//! Holds three copies of the application record:
//!
//! - *default*: the record as default-constructed, kept for reference
//! - *committed*: what the next save persists; replaced by loads
//! - *staged*: the working copy callers edit through
//!   [`StagingManager::edit_staged`]
//!
//! Edits only reach disk through a fold (`fold_staged_into_committed`),
//! which every save runs first. [`StagingManager::discard_staged`] throws
//! edits away by re-copying the committed record.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──init()──▶ Initialized
//! ```
//!
//! Every operation before `init` is rejected with a warning and performs
//! no I/O. Slot numbers are 1-based; out-of-range numbers are rejected the
//! same way.

use std::fmt;
use std::sync::Arc;

use slotsave_core::{InitError, Record, SaveConfig, SlotIndex};
use slotsave_durability::{Completion, RecordStore, SlotRecorder};
use tracing::{debug, info, warn};

use crate::error::StagingError;
use crate::hooks::StagingHooks;

struct StagingTriple<R> {
    default: R,
    committed: R,
    staged: R,
}

enum StagingState<R> {
    Uninitialized,
    Initialized(StagingTriple<R>),
}

/// Mediates between caller-visible record state and a slot recorder
pub struct StagingManager<R: Record, H: StagingHooks<R>> {
    config: SaveConfig,
    recorder: Arc<dyn SlotRecorder<R>>,
    hooks: H,
    state: StagingState<R>,
}

impl<R: Record, H: StagingHooks<R>> StagingManager<R, H> {
    /// Create a manager backed by a filesystem [`RecordStore`]
    pub fn new(config: SaveConfig, hooks: H) -> Self {
        Self::with_recorder(config, Arc::new(RecordStore::new()), hooks)
    }

    /// Create a manager over any recorder implementation
    pub fn with_recorder(config: SaveConfig, recorder: Arc<dyn SlotRecorder<R>>, hooks: H) -> Self {
        StagingManager {
            config,
            recorder,
            hooks,
            state: StagingState::Uninitialized,
        }
    }

    /// Initialize the recorder and seed the record copies
    ///
    /// Runs once; later calls return `Ok(())` without doing anything.
    /// A failure leaves the manager uninitialized.
    pub fn init(&mut self) -> Result<(), InitError> {
        if self.is_initialized() {
            debug!(target: "slotsave::staging", "Staging manager already initialized, ignoring");
            return Ok(());
        }

        self.recorder.initialize(&self.config)?;

        let default = R::default();
        let committed = R::deep_copy(&default);
        let staged = R::deep_copy(&default);
        self.state = StagingState::Initialized(StagingTriple {
            default,
            committed,
            staged,
        });

        info!(
            target: "slotsave::staging",
            namespace = %self.config.namespace,
            slots = self.config.max_index,
            "Staging manager initialized"
        );
        Ok(())
    }

    /// True once `init` has succeeded
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, StagingState::Initialized(_))
    }

    /// Fold staged edits into the committed record and persist it
    pub fn save(&mut self, slot: i64) -> Result<Completion, StagingError> {
        let index = self.check_slot(slot, "save")?;
        let StagingState::Initialized(records) = &mut self.state else {
            return Err(StagingError::NotInitialized);
        };

        self.hooks.on_save_start();
        self.hooks
            .fold_staged_into_committed(&records.staged, &mut records.committed);

        let completion = self.recorder.save(index, &records.committed);
        self.hooks.on_save_completed(&completion.error);
        Ok(completion)
    }

    /// Load a slot, replacing the committed and staged records when found
    ///
    /// Returns whether a record was found. When it was not, the in-memory
    /// records are left as they were.
    pub fn load(&mut self, slot: i64) -> Result<bool, StagingError> {
        let index = self.check_slot(slot, "load")?;
        let StagingState::Initialized(records) = &mut self.state else {
            return Err(StagingError::NotInitialized);
        };

        self.hooks.on_load_start();
        let found = match self.recorder.load(index) {
            Some(record) => {
                records.committed = record;
                records.staged = R::deep_copy(&records.committed);
                true
            }
            None => {
                debug!(target: "slotsave::staging", slot, "No save data to load");
                false
            }
        };

        self.hooks.on_load_completed(found);
        Ok(found)
    }

    /// Delete a slot's files
    pub fn delete(&mut self, slot: i64) -> Result<Completion, StagingError> {
        let index = self.check_slot(slot, "delete")?;

        let completion = self.recorder.delete(index);
        self.hooks.on_delete_completed(&completion.error);
        Ok(completion)
    }

    /// Apply an edit to the staged record
    pub fn edit_staged<T>(&mut self, edit: impl FnOnce(&mut R) -> T) -> Result<T, StagingError> {
        match &mut self.state {
            StagingState::Initialized(records) => Ok(edit(&mut records.staged)),
            StagingState::Uninitialized => Err(self.reject_uninitialized("edit")),
        }
    }

    /// Fold staged edits into the committed record without saving
    pub fn commit_staged(&mut self) -> Result<(), StagingError> {
        match &mut self.state {
            StagingState::Initialized(records) => {
                self.hooks
                    .fold_staged_into_committed(&records.staged, &mut records.committed);
                Ok(())
            }
            StagingState::Uninitialized => Err(self.reject_uninitialized("commit")),
        }
    }

    /// Throw away staged edits by re-copying the committed record
    pub fn discard_staged(&mut self) -> Result<(), StagingError> {
        match &mut self.state {
            StagingState::Initialized(records) => {
                records.staged.deep_copy_from(&records.committed);
                Ok(())
            }
            StagingState::Uninitialized => Err(self.reject_uninitialized("discard")),
        }
    }

    /// The working copy, `None` before `init`
    pub fn staged(&self) -> Option<&R> {
        match &self.state {
            StagingState::Initialized(records) => Some(&records.staged),
            StagingState::Uninitialized => None,
        }
    }

    /// The record the next save persists, `None` before `init`
    pub fn committed(&self) -> Option<&R> {
        match &self.state {
            StagingState::Initialized(records) => Some(&records.committed),
            StagingState::Uninitialized => None,
        }
    }

    /// The default-constructed record, `None` before `init`
    pub fn default_record(&self) -> Option<&R> {
        match &self.state {
            StagingState::Initialized(records) => Some(&records.default),
            StagingState::Uninitialized => None,
        }
    }

    /// True if no slot holds a save (also true before `init`)
    pub fn is_nothing(&self) -> bool {
        self.recorder.is_nothing()
    }

    /// Configured slot count
    pub fn max_index(&self) -> usize {
        self.config.max_index
    }

    /// Configuration this manager was created with
    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Underlying recorder, for subscribing to its completion channels
    pub fn recorder(&self) -> &Arc<dyn SlotRecorder<R>> {
        &self.recorder
    }

    /// Injected hooks
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Injected hooks, mutably
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    fn check_slot(&self, slot: i64, op: &'static str) -> Result<SlotIndex, StagingError> {
        if !self.is_initialized() {
            return Err(self.reject_uninitialized(op));
        }

        SlotIndex::from_user(slot, self.config.max_index).map_err(|e| {
            warn!(
                target: "slotsave::staging",
                op,
                slot,
                max_index = self.config.max_index,
                "Invalid slot index, request ignored"
            );
            StagingError::from(e)
        })
    }

    fn reject_uninitialized(&self, op: &'static str) -> StagingError {
        warn!(target: "slotsave::staging", op, "Staging manager not initialized, request ignored");
        StagingError::NotInitialized
    }
}

impl<R: Record, H: StagingHooks<R>> fmt::Debug for StagingManager<R, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagingManager")
            .field("namespace", &self.config.namespace)
            .field("max_index", &self.config.max_index)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
