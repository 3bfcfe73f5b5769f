//! Demo record and the hooks that narrate its lifecycle.

use serde::{Deserialize, Serialize};
use slotsave_core::Record;
use slotsave_engine::StagingHooks;

/// Record the CLI saves and loads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoRecord {
    pub num: i32,
    pub name: String,
    pub test_num: Vec<i32>,
}

impl Default for DemoRecord {
    fn default() -> Self {
        DemoRecord {
            num: 1,
            name: "AAA".to_string(),
            test_num: vec![1, 2, 3],
        }
    }
}

impl Record for DemoRecord {}

/// Folds every field and keeps a log of lifecycle events for display.
#[derive(Debug, Default)]
pub struct DemoHooks {
    events: Vec<String>,
}

impl DemoHooks {
    /// Drain the events recorded so far.
    pub fn take_events(&mut self) -> Vec<String> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, event: impl Into<String>) {
        self.events.push(event.into());
    }
}

impl StagingHooks<DemoRecord> for DemoHooks {
    fn fold_staged_into_committed(&mut self, staged: &DemoRecord, committed: &mut DemoRecord) {
        committed.deep_copy_from(staged);
    }

    fn on_save_start(&mut self) {
        self.push("save started");
    }

    fn on_save_completed(&mut self, error: &str) {
        if error.is_empty() {
            self.push("save completed");
        } else {
            self.push(format!("save failed: {error}"));
        }
    }

    fn on_load_start(&mut self) {
        self.push("load started");
    }

    fn on_load_completed(&mut self, found: bool) {
        if found {
            self.push("load completed");
        } else {
            self.push("load completed: no save data");
        }
    }

    fn on_delete_completed(&mut self, error: &str) {
        if error.is_empty() {
            self.push("delete completed");
        } else {
            self.push(format!("delete failed: {error}"));
        }
    }
}
