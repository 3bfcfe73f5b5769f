//! Application extension points
//!
//! A [`StagingManager`](crate::StagingManager) is customized per record
//! type by injecting a hooks value at construction. Only the fold is
//! required; the lifecycle notifications default to doing nothing.

use slotsave_core::Record;

/// Per-record-type behavior supplied by the application
pub trait StagingHooks<R: Record>: Send {
    /// Merge the staged edits into the committed record before a save.
    ///
    /// Implementations decide field by field what graduates; anything not
    /// copied here is not persisted.
    fn fold_staged_into_committed(&mut self, staged: &R, committed: &mut R);

    /// Called before a save is issued.
    fn on_save_start(&mut self) {}

    /// Called after a save; `error` is empty on success.
    fn on_save_completed(&mut self, _error: &str) {}

    /// Called before a load is issued.
    fn on_load_start(&mut self) {}

    /// Called after a load; `found` is false when the slot had no usable record.
    fn on_load_completed(&mut self, _found: bool) {}

    /// Called after a delete; `error` is empty on success.
    fn on_delete_completed(&mut self, _error: &str) {}
}

/// Hooks that fold by deep-copying the whole staged record
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyAllFold;

impl<R: Record> StagingHooks<R> for CopyAllFold {
    fn fold_staged_into_committed(&mut self, staged: &R, committed: &mut R) {
        committed.deep_copy_from(staged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        num: i32,
        tags: Vec<String>,
    }

    impl Record for Sample {}

    #[test]
    fn test_copy_all_fold() {
        let staged = Sample {
            num: 3,
            tags: vec!["a".to_string()],
        };
        let mut committed = Sample::default();

        CopyAllFold.fold_staged_into_committed(&staged, &mut committed);

        assert_eq!(committed, staged);
    }
}
