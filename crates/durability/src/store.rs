//! Slot record store
//!
//! The persistence engine: one record per slot, a backup of the previous
//! primary taken before every overwrite, and a fallback to that backup when
//! the primary cannot be read.
//!
//! # Outcomes
//!
//! Save, load and delete never fail hard. Every outcome is both returned
//! to the caller and published on the matching [`EventBus`]:
//!
//! | Operation | Returned | Published |
//! |-----------|----------|-----------|
//! | save      | [`Completion`] | `String`, empty on success |
//! | load      | `Option<R>`    | `Option<R>`, `None` = no record |
//! | delete    | [`Completion`] | `String`, empty on success |
//!
//! Notifications are delivered on the calling thread before the call
//! returns, after every lock the store holds has been released.
//!
//! # Ordering
//!
//! Operations on the same slot are serialized by a per-slot mutex, so a
//! load never observes a primary or backup mid-write. Different slots
//! proceed independently.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::path::{Path, PathBuf};

use slotsave_core::{InitError, Record, SaveConfig, SaveFormat, SlotIndex};
use tracing::{debug, error, info, warn};

use crate::bus::EventBus;
use crate::codec::{codec_for, RecordCodec};
use crate::error::{StoreError, StoreResult};
use crate::outcome::Completion;
use crate::paths::SlotPaths;
use crate::writer;

/// Platform-facing recorder interface.
///
/// [`RecordStore`] is the local-filesystem implementation; platforms with
/// their own save APIs can provide another one.
pub trait SlotRecorder<R: Record>: Send + Sync {
    /// Build the path table and prepare the namespace directory.
    ///
    /// Only the first successful call has an effect; later calls return
    /// `Ok(())` without touching the configuration.
    fn initialize(&self, config: &SaveConfig) -> Result<(), InitError>;

    /// Persist `record` into `slot`, backing up the previous primary first.
    fn save(&self, slot: SlotIndex, record: &R) -> Completion;

    /// Load the record in `slot`, falling back to its backup on failure.
    ///
    /// `None` means "no record": the slot was never saved, or neither the
    /// primary nor the backup could be decoded.
    fn load(&self, slot: SlotIndex) -> Option<R>;

    /// Remove the primary and backup of `slot`.
    fn delete(&self, slot: SlotIndex) -> Completion;

    /// True if any slot has a primary file.
    fn exists(&self) -> bool;

    /// True if no slot has been saved yet (fresh install).
    fn is_nothing(&self) -> bool {
        !self.exists()
    }

    /// Load completion channel.
    fn on_load_completed(&self) -> &EventBus<Option<R>>;

    /// Save completion channel.
    fn on_save_completed(&self) -> &EventBus<String>;

    /// Delete completion channel.
    fn on_delete_completed(&self) -> &EventBus<String>;
}

struct StoreState<R: Record> {
    paths: SlotPaths,
    codec: Box<dyn RecordCodec<R>>,
    backup: bool,
    sync_writes: bool,
    slot_locks: Vec<Mutex<()>>,
}

struct SlotFiles<'a> {
    primary: &'a Path,
    backup: &'a Path,
    temp: PathBuf,
    backup_temp: PathBuf,
    lock: &'a Mutex<()>,
}

impl<R: Record> StoreState<R> {
    fn new(paths: SlotPaths, config: &SaveConfig) -> Self {
        StoreState {
            slot_locks: (0..paths.len()).map(|_| Mutex::new(())).collect(),
            codec: codec_for(config.format),
            backup: config.backup,
            sync_writes: config.sync_writes,
            paths,
        }
    }

    fn slot_files(&self, slot: SlotIndex) -> StoreResult<SlotFiles<'_>> {
        let out_of_range = || StoreError::SlotOutOfRange {
            slot: slot.get(),
            max_index: self.paths.len(),
        };
        Ok(SlotFiles {
            primary: self.paths.primary(slot).ok_or_else(out_of_range)?,
            backup: self.paths.backup(slot).ok_or_else(out_of_range)?,
            temp: self.paths.temp(slot).ok_or_else(out_of_range)?,
            backup_temp: self.paths.backup_temp(slot).ok_or_else(out_of_range)?,
            lock: self.slot_locks.get(slot.get()).ok_or_else(out_of_range)?,
        })
    }

    fn save(&self, slot: SlotIndex, record: &R) -> StoreResult<()> {
        let files = self.slot_files(slot)?;
        let _guard = files.lock.lock();

        let payload = self.codec.encode(record)?;

        // The previous primary is staged beside the backup and only
        // replaces it once the new primary is in place, so a failed save
        // keeps the last good backup.
        let staged_backup = if self.backup && files.primary.exists() {
            writer::copy_file(files.primary, &files.backup_temp)?;
            true
        } else {
            false
        };

        let written = writer::write_atomic(&files.temp, files.primary, &payload, self.sync_writes);
        if let Err(e) = written {
            if staged_backup {
                if let Err(cleanup) = writer::remove_if_exists(&files.backup_temp) {
                    warn!(
                        target: "slotsave::store",
                        error = %cleanup,
                        "Failed to discard staged backup"
                    );
                }
            }
            return Err(e);
        }

        if staged_backup {
            writer::replace_file(&files.backup_temp, files.backup)?;
            debug!(
                target: "slotsave::store",
                slot = slot.get(),
                path = %files.backup.display(),
                "Previous save backed up"
            );
        }
        Ok(())
    }

    fn load(&self, slot: SlotIndex) -> StoreResult<Option<R>> {
        let files = self.slot_files(slot)?;
        let _guard = files.lock.lock();

        if !files.primary.exists() {
            return Ok(None);
        }

        let primary_err = match self.read_record(files.primary) {
            Ok(record) => return Ok(Some(record)),
            Err(e) => e,
        };
        warn!(
            target: "slotsave::store",
            slot = slot.get(),
            path = %files.primary.display(),
            error = %primary_err,
            "Failed to load primary save file"
        );

        if !self.backup {
            return Err(primary_err);
        }

        match self.read_record(files.backup) {
            Ok(record) => {
                info!(
                    target: "slotsave::store",
                    slot = slot.get(),
                    path = %files.backup.display(),
                    "Recovered save from backup"
                );
                Ok(Some(record))
            }
            Err(backup_err) => {
                warn!(
                    target: "slotsave::store",
                    slot = slot.get(),
                    path = %files.backup.display(),
                    error = %backup_err,
                    "Failed to load backup save file"
                );
                Err(backup_err)
            }
        }
    }

    fn delete(&self, slot: SlotIndex) -> StoreResult<()> {
        let files = self.slot_files(slot)?;
        let _guard = files.lock.lock();

        // Attempt both removals even if the first fails.
        let primary = writer::remove_if_exists(files.primary);
        let backup = writer::remove_if_exists(files.backup);
        primary?;
        backup?;
        Ok(())
    }

    fn read_record(&self, path: &Path) -> StoreResult<R> {
        let data = writer::read_file(path)?;
        Ok(self.codec.decode(&data)?)
    }
}

/// Filesystem-backed slot store
///
/// Created uninitialized; [`SlotRecorder::initialize`] (or
/// [`RecordStore::open`]) fixes the configuration for the store's lifetime.
/// The store is `Send + Sync` and can be shared through an `Arc`.
pub struct RecordStore<R: Record> {
    state: RwLock<Option<StoreState<R>>>,
    load_completed: EventBus<Option<R>>,
    save_completed: EventBus<String>,
    delete_completed: EventBus<String>,
}

impl<R: Record> RecordStore<R> {
    /// Create an uninitialized store
    pub fn new() -> Self {
        RecordStore {
            state: RwLock::new(None),
            load_completed: EventBus::new(),
            save_completed: EventBus::new(),
            delete_completed: EventBus::new(),
        }
    }

    /// Create and initialize a store in one step
    pub fn open(config: &SaveConfig) -> Result<Self, InitError> {
        let store = Self::new();
        store.initialize(config)?;
        Ok(store)
    }

    /// True once `initialize` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.state.read().is_some()
    }

    /// Configured slot count, 0 before initialization
    pub fn max_index(&self) -> usize {
        self.state.read().as_ref().map_or(0, |s| s.paths.len())
    }

    /// Configured format
    pub fn format(&self) -> Option<SaveFormat> {
        self.state.read().as_ref().map(|s| s.paths.format())
    }

    /// True if backups are enabled
    pub fn backup_enabled(&self) -> bool {
        self.state.read().as_ref().is_some_and(|s| s.backup)
    }

    /// Namespace directory holding the slot files
    pub fn namespace_dir(&self) -> Option<PathBuf> {
        self.state.read().as_ref().map(|s| s.paths.dir().to_path_buf())
    }

    /// Primary file of a slot
    pub fn primary_path(&self, slot: SlotIndex) -> Option<PathBuf> {
        self.state
            .read()
            .as_ref()
            .and_then(|s| s.paths.primary(slot).map(Path::to_path_buf))
    }

    /// Backup file of a slot
    pub fn backup_path(&self, slot: SlotIndex) -> Option<PathBuf> {
        self.state
            .read()
            .as_ref()
            .and_then(|s| s.paths.backup(slot).map(Path::to_path_buf))
    }

    fn with_state<T>(&self, op: impl FnOnce(&StoreState<R>) -> StoreResult<T>) -> StoreResult<T> {
        match self.state.read().as_ref() {
            Some(state) => op(state),
            None => Err(StoreError::NotInitialized),
        }
    }
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("RecordStore")
            .field("dir", &state.as_ref().map(|s| s.paths.dir().to_path_buf()))
            .field("slots", &state.as_ref().map_or(0, |s| s.paths.len()))
            .field("backup", &state.as_ref().is_some_and(|s| s.backup))
            .finish()
    }
}

impl<R: Record> SlotRecorder<R> for RecordStore<R> {
    fn initialize(&self, config: &SaveConfig) -> Result<(), InitError> {
        let mut state = self.state.write();
        if state.is_some() {
            debug!(target: "slotsave::store", "Save store already initialized, ignoring");
            return Ok(());
        }

        config.validate()?;
        let paths = SlotPaths::resolve(config)?;

        match paths.cleanup_temp_files() {
            Ok(0) => {}
            Ok(removed) => {
                warn!(target: "slotsave::store", removed, "Removed temp files from interrupted saves")
            }
            Err(e) => {
                warn!(target: "slotsave::store", error = %e, "Failed to clean up temp files")
            }
        }

        info!(
            target: "slotsave::store",
            dir = %paths.dir().display(),
            format = %config.format,
            slots = config.max_index,
            backup = config.backup,
            "Save store initialized"
        );

        *state = Some(StoreState::new(paths, config));
        Ok(())
    }

    fn save(&self, slot: SlotIndex, record: &R) -> Completion {
        let completion = match self.with_state(|state| state.save(slot, record)) {
            Ok(()) => {
                debug!(target: "slotsave::store", slot = slot.get(), "Save completed");
                Completion::success(slot)
            }
            Err(e) => {
                error!(target: "slotsave::store", slot = slot.get(), error = %e, "Save failed");
                Completion::failure(slot, e.to_string())
            }
        };

        self.save_completed.publish(&completion.error);
        completion
    }

    fn load(&self, slot: SlotIndex) -> Option<R> {
        let record = match self.with_state(|state| state.load(slot)) {
            Ok(Some(record)) => {
                debug!(target: "slotsave::store", slot = slot.get(), "Load completed");
                Some(record)
            }
            Ok(None) => {
                debug!(target: "slotsave::store", slot = slot.get(), "No save data in slot");
                None
            }
            Err(e) => {
                error!(
                    target: "slotsave::store",
                    slot = slot.get(),
                    error = %e,
                    "Save data unreadable, treating slot as empty"
                );
                None
            }
        };

        self.load_completed.publish(&record);
        record
    }

    fn delete(&self, slot: SlotIndex) -> Completion {
        let completion = match self.with_state(|state| state.delete(slot)) {
            Ok(()) => {
                debug!(target: "slotsave::store", slot = slot.get(), "Delete completed");
                Completion::success(slot)
            }
            Err(e) => {
                error!(target: "slotsave::store", slot = slot.get(), error = %e, "Delete failed");
                Completion::failure(slot, e.to_string())
            }
        };

        self.delete_completed.publish(&completion.error);
        completion
    }

    fn exists(&self) -> bool {
        self.state
            .read()
            .as_ref()
            .is_some_and(|s| s.paths.any_primary_exists())
    }

    fn on_load_completed(&self) -> &EventBus<Option<R>> {
        &self.load_completed
    }

    fn on_save_completed(&self) -> &EventBus<String> {
        &self.save_completed
    }

    fn on_delete_completed(&self) -> &EventBus<String> {
        &self.delete_completed
    }
}
