//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
pub use slotsave::{Completion, CopyAllFold, Record, SaveConfig, SaveFormat, StagingManager};
use tempfile::TempDir;

// ============================================================================
// Records
// ============================================================================

/// The record used throughout the suites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub num: i32,
    pub name: String,
    pub test_num: Vec<i32>,
}

impl Default for SaveData {
    fn default() -> Self {
        SaveData {
            num: 1,
            name: "AAA".to_string(),
            test_num: vec![1, 2, 3],
        }
    }
}

impl Record for SaveData {}

// ============================================================================
// TestSaves - temp directory plus a configured manager
// ============================================================================

/// Temporary save directory with a manager over namespace "T".
pub struct TestSaves {
    pub dir: TempDir,
    pub manager: StagingManager<SaveData, CopyAllFold>,
}

impl TestSaves {
    /// Two text slots with backups.
    pub fn new() -> Self {
        Self::with_format(SaveFormat::Text)
    }

    pub fn with_format(format: SaveFormat) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let manager = open_manager(dir.path(), format);
        TestSaves { dir, manager }
    }

    /// A second manager over the same files, as after a restart.
    pub fn reopen(&self) -> StagingManager<SaveData, CopyAllFold> {
        open_manager(self.dir.path(), self.manager.config().format)
    }

    pub fn ns_dir(&self) -> PathBuf {
        self.dir.path().join("T")
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.ns_dir().join(name)
    }

    /// Stage `num`/`name` and save to a 1-based slot.
    pub fn save(&mut self, slot: i64, num: i32, name: &str) -> Completion {
        self.manager
            .edit_staged(|r| {
                r.num = num;
                r.name = name.to_string();
            })
            .expect("manager initialized");
        self.manager.save(slot).expect("slot in range")
    }

    /// Load a 1-based slot; returns the committed record when found.
    pub fn load(&mut self, slot: i64) -> Option<SaveData> {
        if self.manager.load(slot).expect("slot in range") {
            self.manager.committed().cloned()
        } else {
            None
        }
    }
}

pub fn config(dir: &Path, format: SaveFormat) -> SaveConfig {
    SaveConfig::new(dir)
        .with_namespace("T")
        .with_max_index(2)
        .with_format(format)
        .with_sync_writes(false)
}

pub fn open_manager(dir: &Path, format: SaveFormat) -> StagingManager<SaveData, CopyAllFold> {
    let mut manager = StagingManager::new(config(dir, format), CopyAllFold);
    manager.init().expect("Failed to initialize manager");
    manager
}

/// Sorted file names in a directory; empty if it does not exist.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
