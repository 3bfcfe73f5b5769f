//! Slot file layout
//!
//! Every namespace owns one directory holding a primary and a backup file
//! per slot:
//!
//! ```text
//! <base_dir>/<namespace>/
//! ├── SaveData_0.txt          # slot 1 primary
//! ├── SaveData_0_BackUp.txt   # slot 1 previous primary
//! ├── SaveData_1.txt
//! ├── SaveData_1_BackUp.txt
//! └── .SaveData_1.txt.tmp     # in-flight write (removed on success)
//! ```
//!
//! Binary stores use the same names without the `.txt` suffix.

use std::path::{Path, PathBuf};

use slotsave_core::{InitError, SaveConfig, SaveFormat, SlotIndex};

/// Base name of every slot file.
pub const BASE_FILE_NAME: &str = "SaveData";

/// Suffix distinguishing backup files from primaries.
pub const BACKUP_SUFFIX: &str = "_BackUp";

const TEMP_PREFIX: &str = ".";
const TEMP_SUFFIX: &str = ".tmp";

/// Primary and backup paths for every configured slot.
///
/// Computed once from (directory, format, slot count) and never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPaths {
    dir: PathBuf,
    format: SaveFormat,
    primary: Vec<PathBuf>,
    backup: Vec<PathBuf>,
}

impl SlotPaths {
    /// Compute the path table without touching the filesystem.
    pub fn compute(dir: impl AsRef<Path>, format: SaveFormat, max_index: usize) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let ext = format.extension();

        let primary = (0..max_index)
            .map(|i| dir.join(format!("{BASE_FILE_NAME}_{i}{ext}")))
            .collect();
        let backup = (0..max_index)
            .map(|i| dir.join(format!("{BASE_FILE_NAME}_{i}{BACKUP_SUFFIX}{ext}")))
            .collect();

        SlotPaths {
            dir,
            format,
            primary,
            backup,
        }
    }

    /// Compute the path table for a config and create its namespace directory.
    pub fn resolve(config: &SaveConfig) -> Result<Self, InitError> {
        let dir = config.namespace_dir();
        std::fs::create_dir_all(&dir).map_err(|source| InitError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self::compute(dir, config.format, config.max_index))
    }

    /// Namespace directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Format the table was computed for
    pub fn format(&self) -> SaveFormat {
        self.format
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    /// True if no slots are configured
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Primary file for a slot, `None` if the slot is not configured
    pub fn primary(&self, slot: SlotIndex) -> Option<&Path> {
        self.primary.get(slot.get()).map(PathBuf::as_path)
    }

    /// Backup file for a slot, `None` if the slot is not configured
    pub fn backup(&self, slot: SlotIndex) -> Option<&Path> {
        self.backup.get(slot.get()).map(PathBuf::as_path)
    }

    /// Scratch file a new primary is written to before being renamed in place
    pub fn temp(&self, slot: SlotIndex) -> Option<PathBuf> {
        let primary = self.primary(slot)?;
        let name = primary.file_name()?.to_string_lossy();
        Some(self.dir.join(format!("{TEMP_PREFIX}{name}{TEMP_SUFFIX}")))
    }

    /// Scratch file the previous primary is copied to until the new one lands
    pub fn backup_temp(&self, slot: SlotIndex) -> Option<PathBuf> {
        let backup = self.backup(slot)?;
        let name = backup.file_name()?.to_string_lossy();
        Some(self.dir.join(format!("{TEMP_PREFIX}{name}{TEMP_SUFFIX}")))
    }

    /// Iterate over all primary files in slot order
    pub fn primaries(&self) -> impl Iterator<Item = &Path> {
        self.primary.iter().map(PathBuf::as_path)
    }

    /// True if any slot has a primary file on disk
    pub fn any_primary_exists(&self) -> bool {
        self.primaries().any(Path::exists)
    }

    /// Remove scratch files left behind by interrupted writes
    ///
    /// Returns the number of files removed.
    pub fn cleanup_temp_files(&self) -> std::io::Result<usize> {
        let mut count = 0;

        for slot in (0..self.len()).map(SlotIndex::new) {
            for temp in [self.temp(slot), self.backup_temp(slot)].into_iter().flatten() {
                match std::fs::remove_file(&temp) {
                    Ok(()) => count += 1,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(count)
    }
}
