//! Full slot lifecycle: save, overwrite, corrupt, recover, delete.

use crate::common::*;

#[test]
fn test_slot_lifecycle_text() {
    let mut saves = TestSaves::new();

    // First save creates the primary only.
    assert!(saves.save(1, 5, "x").is_success());
    assert_eq!(list_files(&saves.ns_dir()), vec!["SaveData_0.txt"]);

    // Overwrite keeps the previous save as backup.
    assert!(saves.save(1, 6, "y").is_success());
    assert_eq!(
        list_files(&saves.ns_dir()),
        vec!["SaveData_0.txt", "SaveData_0_BackUp.txt"]
    );
    let backup = std::fs::read_to_string(saves.file("SaveData_0_BackUp.txt")).unwrap();
    let backup: serde_json::Value = serde_json::from_str(&backup).unwrap();
    assert_eq!(backup["num"], 5);

    let loaded = saves.load(1).unwrap();
    assert_eq!((loaded.num, loaded.name.as_str()), (6, "y"));

    // Damaged primary: the backup answers.
    std::fs::write(saves.file("SaveData_0.txt"), b"{ not json").unwrap();
    let loaded = saves.load(1).unwrap();
    assert_eq!((loaded.num, loaded.name.as_str()), (5, "x"));

    // Delete removes both files; the slot then reads as never saved.
    assert!(saves.manager.delete(1).unwrap().is_success());
    assert!(list_files(&saves.ns_dir()).is_empty());
    assert_eq!(saves.load(1), None);
    assert!(saves.manager.is_nothing());
}

#[test]
fn test_slot_lifecycle_binary() {
    let mut saves = TestSaves::with_format(SaveFormat::Binary);

    saves.save(2, 5, "x");
    saves.save(2, 6, "y");
    assert_eq!(
        list_files(&saves.ns_dir()),
        vec!["SaveData_1", "SaveData_1_BackUp"]
    );

    std::fs::write(saves.file("SaveData_1"), [0xff; 3]).unwrap();
    assert_eq!(saves.load(2).unwrap().num, 5);
}

#[test]
fn test_saves_survive_restart() {
    let mut saves = TestSaves::new();
    saves.save(2, 42, "persisted");

    let mut reopened = saves.reopen();
    assert!(!reopened.is_nothing());
    assert!(reopened.load(2).unwrap());
    assert_eq!(reopened.committed().unwrap().num, 42);
    assert_eq!(reopened.staged().unwrap().name, "persisted");
}

#[test]
fn test_slots_are_independent() {
    let mut saves = TestSaves::new();
    saves.save(1, 1, "one");
    saves.save(2, 2, "two");

    saves.manager.delete(1).unwrap();

    assert_eq!(saves.load(1), None);
    assert_eq!(saves.load(2).unwrap().name, "two");
}

#[test]
fn test_unsaved_edits_are_lost_on_restart() {
    let mut saves = TestSaves::new();
    saves.save(1, 5, "x");
    saves.manager.edit_staged(|r| r.num = 99).unwrap();

    let mut reopened = saves.reopen();
    reopened.load(1).unwrap();

    assert_eq!(reopened.committed().unwrap().num, 5);
}

#[test]
fn test_both_files_unreadable_is_like_fresh_install() {
    let mut saves = TestSaves::new();
    saves.save(1, 5, "x");
    saves.save(1, 6, "y");
    saves.manager.edit_staged(|r| r.num = 77).unwrap();

    std::fs::write(saves.file("SaveData_0.txt"), b"").unwrap();
    std::fs::write(saves.file("SaveData_0_BackUp.txt"), b"[]").unwrap();

    assert_eq!(saves.load(1), None);
    // In-memory state is untouched by a failed load.
    assert_eq!(saves.manager.staged().unwrap().num, 77);
}

#[test]
fn test_without_backups_a_corrupt_primary_is_lost() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), SaveFormat::Text).with_backup(false);
    let mut manager = StagingManager::<SaveData, _>::new(config, CopyAllFold);
    manager.init().unwrap();
    manager.save(1).unwrap();
    manager.save(1).unwrap();

    assert_eq!(list_files(&dir.path().join("T")), vec!["SaveData_0.txt"]);

    std::fs::write(dir.path().join("T/SaveData_0.txt"), b"junk").unwrap();
    assert!(!manager.load(1).unwrap());
}

#[test]
fn test_interrupted_write_is_cleaned_on_init() {
    let saves = TestSaves::new();
    std::fs::write(saves.file(".SaveData_0.txt.tmp"), b"half a reco").unwrap();

    let reopened = saves.reopen();

    assert!(reopened.is_initialized());
    assert!(!saves.file(".SaveData_0.txt.tmp").exists());
}
