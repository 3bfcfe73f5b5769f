//! Completion channels seen from outside the store.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::*;

#[test]
fn test_channels_report_every_operation() {
    let mut saves = TestSaves::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(saves.manager.recorder());

    let _save = {
        let log = Arc::clone(&log);
        recorder
            .on_save_completed()
            .subscribe(move |e: &String| log.lock().push(format!("save:{e}")))
    };
    let _load = {
        let log = Arc::clone(&log);
        recorder.on_load_completed().subscribe(move |r: &Option<SaveData>| {
            log.lock()
                .push(format!("load:{}", r.as_ref().map_or(-1, |r| r.num)))
        })
    };
    let _delete = {
        let log = Arc::clone(&log);
        recorder
            .on_delete_completed()
            .subscribe(move |e: &String| log.lock().push(format!("delete:{e}")))
    };

    saves.save(1, 5, "x");
    saves.load(1);
    saves.manager.delete(1).unwrap();
    saves.load(1);

    assert_eq!(*log.lock(), vec!["save:", "load:5", "delete:", "load:-1"]);
}

#[test]
fn test_dropped_subscription_receives_nothing() {
    let mut saves = TestSaves::new();
    let count = Arc::new(Mutex::new(0));

    let subscription = {
        let count = Arc::clone(&count);
        saves
            .manager
            .recorder()
            .on_save_completed()
            .subscribe(move |_: &String| *count.lock() += 1)
    };
    saves.save(1, 1, "a");
    drop(subscription);
    saves.save(1, 2, "b");

    assert_eq!(*count.lock(), 1);
    assert_eq!(saves.manager.recorder().on_save_completed().subscriber_count(), 0);
}

#[test]
fn test_detached_subscription_outlives_guard() {
    let mut saves = TestSaves::new();
    let count = Arc::new(Mutex::new(0));

    {
        let count = Arc::clone(&count);
        saves
            .manager
            .recorder()
            .on_delete_completed()
            .subscribe(move |_: &String| *count.lock() += 1)
            .detach();
    }
    saves.manager.delete(1).unwrap();
    saves.manager.delete(2).unwrap();

    assert_eq!(*count.lock(), 2);
}

#[test]
fn test_rejected_slot_publishes_nothing() {
    let mut saves = TestSaves::new();
    let count = Arc::new(Mutex::new(0));
    let _sub = {
        let count = Arc::clone(&count);
        saves
            .manager
            .recorder()
            .on_save_completed()
            .subscribe(move |_: &String| *count.lock() += 1)
    };

    assert!(saves.manager.save(0).is_err());
    assert!(saves.manager.save(3).is_err());

    assert_eq!(*count.lock(), 0);
}
