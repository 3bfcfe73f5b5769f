//! One shared manager per record type.

use std::sync::Arc;

use slotsave::{global_registry, ManagerRegistry};

use crate::common::*;

#[test]
fn test_shared_manager_sees_other_handles_saves() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ManagerRegistry::new();
    let create = || {
        StagingManager::<SaveData, CopyAllFold>::new(
            config(dir.path(), SaveFormat::Binary),
            CopyAllFold,
        )
    };

    let writer = registry.get_or_insert_with(create);
    writer.lock().init().unwrap();
    writer.lock().edit_staged(|r| r.num = 12).unwrap();
    writer.lock().save(1).unwrap();

    let reader = registry.get_or_insert_with(create);
    // Already initialized by the first handle.
    reader.lock().init().unwrap();
    assert!(reader.lock().load(1).unwrap());
    assert_eq!(reader.lock().committed().unwrap().num, 12);
    assert!(Arc::ptr_eq(&writer, &reader));
}

#[test]
fn test_global_registry_hands_out_one_manager() {
    // A record type private to this test keeps the global map isolated.
    #[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
    struct GlobalOnly {
        n: u8,
    }
    impl Record for GlobalOnly {}

    let dir = tempfile::tempdir().unwrap();
    let make = || {
        StagingManager::<GlobalOnly, CopyAllFold>::new(
            SaveConfig::new(dir.path()).with_namespace("global"),
            CopyAllFold,
        )
    };

    let a = global_registry().get_or_insert_with(make);
    let b = global_registry().get_or_insert_with(make);

    assert!(Arc::ptr_eq(&a, &b));
    global_registry().remove::<GlobalOnly, CopyAllFold>();
}
