//! Crash-safe slot file I/O
//!
//! A primary is replaced with the write-temp-rename pattern:
//! 1. Write the payload to the slot's temporary file
//! 2. fsync the temporary file (when syncing is enabled)
//! 3. Atomic rename over the primary
//! 4. fsync the parent directory (when syncing is enabled, unix only)
//!
//! Either the complete new primary is visible or the old one is; a failed
//! write never leaves a truncated primary behind.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Replace `path` with `payload`, staging the bytes in `temp_path`.
pub fn write_atomic(temp_path: &Path, path: &Path, payload: &[u8], sync: bool) -> StoreResult<()> {
    // Clean up stale temp file if exists (from previous failed attempt)
    if temp_path.exists() {
        warn!(path = %temp_path.display(), "Removing stale temp file");
        if let Err(e) = fs::remove_file(temp_path) {
            warn!(
                path = %temp_path.display(),
                error = %e,
                "Failed to remove stale temp file"
            );
        }
    }

    if let Err(e) = write_file(temp_path, payload, sync) {
        warn!(
            temp_path = %temp_path.display(),
            error = %e,
            "Write failed, cleaning up temp file"
        );
        let _ = fs::remove_file(temp_path);
        return Err(StoreError::io("write", temp_path, e));
    }

    if let Err(e) = fs::rename(temp_path, path) {
        warn!(
            temp_path = %temp_path.display(),
            error = %e,
            "Rename failed, cleaning up temp file"
        );
        let _ = fs::remove_file(temp_path);
        return Err(StoreError::io("replace", path, e));
    }

    if sync {
        if let Some(parent) = path.parent() {
            sync_dir(parent).map_err(|e| StoreError::io("sync directory", parent, e))?;
        }
    }

    debug!(path = %path.display(), bytes = payload.len(), "Slot file replaced");
    Ok(())
}

fn write_file(path: &Path, payload: &[u8], sync: bool) -> io::Result<()> {
    let mut file = OpenOptions::new().create_new(true).write(true).open(path)?;
    file.write_all(payload)?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// Copy `from` over `to`, replacing any previous content.
pub fn copy_file(from: &Path, to: &Path) -> StoreResult<()> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| StoreError::io("back up to", to, e))
}

/// Rename `from` over `to`, replacing any previous content.
pub fn replace_file(from: &Path, to: &Path) -> StoreResult<()> {
    fs::rename(from, to).map_err(|e| StoreError::io("replace", to, e))
}

/// Remove a file; a missing file is not an error.
///
/// Returns true if a file was removed.
pub fn remove_if_exists(path: &Path) -> StoreResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StoreError::io("delete", path, e)),
    }
}

/// Read a whole slot file.
pub fn read_file(path: &Path) -> StoreResult<Vec<u8>> {
    fs::read(path).map_err(|e| StoreError::io("read", path, e))
}
