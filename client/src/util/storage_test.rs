use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn memory_store() -> Store {
    Store::new(Box::new(MemoryBackend::new()))
}

#[test]
fn raw_values_round_trip_through_backend() {
    let store = memory_store();
    assert_eq!(store.get_raw(StorageKey::AuthToken), None);
    store.set_raw(StorageKey::AuthToken, "abc").unwrap();
    assert_eq!(store.get_raw(StorageKey::AuthToken).as_deref(), Some("abc"));
}

#[test]
fn undecodable_json_reads_as_none() {
    let store = memory_store();
    store.set_raw(StorageKey::HasImportedRecipe, "{not json").unwrap();
    assert_eq!(store.get_json::<bool>(StorageKey::HasImportedRecipe), None);
}

#[test]
fn remove_deletes_value() {
    let store = memory_store();
    store.set_json(StorageKey::HasImportedRecipe, &true).unwrap();
    store.remove(StorageKey::HasImportedRecipe).unwrap();
    assert_eq!(store.get_json::<bool>(StorageKey::HasImportedRecipe), None);
}

#[test]
fn subscribers_see_writes_and_removals_for_their_key_only() {
    let store = memory_store();
    let seen = Rc::new(RefCell::new(Vec::<Option<String>>::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(StorageKey::AuthToken, move |v| sink.borrow_mut().push(v.map(str::to_owned)));

    store.set_raw(StorageKey::AuthToken, "t1").unwrap();
    store.set_raw(StorageKey::ShoppingListColors, "{}").unwrap();
    store.remove(StorageKey::AuthToken).unwrap();

    assert_eq!(*seen.borrow(), vec![Some("t1".to_owned()), None]);
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = memory_store();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = store.subscribe(StorageKey::AuthToken, move |_| *sink.borrow_mut() += 1);

    store.set_raw(StorageKey::AuthToken, "a").unwrap();
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set_raw(StorageKey::AuthToken, "b").unwrap();

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn rejected_write_returns_error_and_skips_notification() {
    let store = Store::new(Box::new(MemoryBackend::rejecting_writes()));
    let notified = Rc::new(RefCell::new(false));
    let sink = Rc::clone(&notified);
    store.subscribe(StorageKey::TourProgress, move |_| *sink.borrow_mut() = true);

    let err = store.set_json(StorageKey::TourProgress, &1).unwrap_err();
    assert!(matches!(err, StorageError::WriteRejected { key: "trackabite.guidedTour", .. }));
    assert!(!*notified.borrow());
}

#[test]
fn save_json_reports_failure_without_propagating() {
    install_backend(Box::new(MemoryBackend::rejecting_writes()));
    assert!(!save_json(StorageKey::HasImportedRecipe, &true));
    assert_eq!(load_json::<bool>(StorageKey::HasImportedRecipe), None);
}

#[test]
fn shared_store_round_trips_json() {
    install_backend(Box::new(MemoryBackend::new()));
    assert!(save_json(StorageKey::InstallPromptDismissedAt, &1_700_000_000_000_i64));
    assert_eq!(load_json::<i64>(StorageKey::InstallPromptDismissedAt), Some(1_700_000_000_000));
    clear(StorageKey::InstallPromptDismissedAt);
    assert_eq!(load_json::<i64>(StorageKey::InstallPromptDismissedAt), None);
}

#[test]
fn listener_may_write_reentrantly() {
    let store = Rc::new(memory_store());
    let inner = Rc::clone(&store);
    store.subscribe(StorageKey::AuthToken, move |v| {
        if v.is_some() {
            inner.set_raw(StorageKey::HasImportedRecipe, "false").unwrap();
        }
    });
    store.set_raw(StorageKey::AuthToken, "x").unwrap();
    assert_eq!(store.get_raw(StorageKey::HasImportedRecipe).as_deref(), Some("false"));
}
