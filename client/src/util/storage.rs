//! Typed persistence over browser `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Tour progress, prompt dismissals, list colors, the auth token and a few
//! one-shot flags all live in device storage. Every read and write goes
//! through the per-thread [`Store`], so writers are serialized through one
//! place and interested components can subscribe to a key instead of
//! re-reading storage on their own schedule.
//!
//! ERROR HANDLING
//! ==============
//! Writes return [`StorageError`]; state owners log the failure and keep
//! running in memory (quota exceeded, private mode, disabled storage).
//! Reads degrade to `None`.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Every durable key the application owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Guided tour progress blob.
    TourProgress,
    /// Progress blob written by the retired welcome flow.
    WelcomeFlow,
    /// Millisecond timestamp of the last iOS install prompt dismissal.
    InstallPromptDismissedAt,
    /// Map of shopping list id to assigned color.
    ShoppingListColors,
    /// Bearer token for the REST API.
    AuthToken,
    /// Set once the user has imported at least one recipe.
    HasImportedRecipe,
    /// Set once the post-first-batch install prompt has been shown.
    FirstBatchInstallPromptShown,
    /// Shopping lists kept on-device before server-side lists existed.
    LegacyShoppingLists,
}

impl StorageKey {
    /// The raw `localStorage` key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TourProgress => "trackabite.guidedTour",
            Self::WelcomeFlow => "trackabite.welcomeFlow",
            Self::InstallPromptDismissedAt => "trackabite.iosInstallPromptDismissedAt",
            Self::ShoppingListColors => "trackabite.shoppingListColors",
            Self::AuthToken => "token",
            Self::HasImportedRecipe => "trackabite.hasImportedRecipe",
            Self::FirstBatchInstallPromptShown => "trackabite.firstBatchInstallPromptShown",
            Self::LegacyShoppingLists => "shoppingLists",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("write to {key} rejected: {reason}")]
    WriteRejected { key: &'static str, reason: String },
    #[error("could not encode value for {key}: {reason}")]
    Encode { key: &'static str, reason: String },
}

/// Raw string storage the [`Store`] delegates to.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &'static str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process backend used outside the browser and in tests.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
    reject_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose writes always fail, like a full quota.
    pub fn rejecting_writes() -> Self {
        Self { entries: RefCell::default(), reject_writes: true }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &'static str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::WriteRejected { key, reason: "quota exceeded".to_owned() });
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser `window.localStorage`.
#[cfg(feature = "hydrate")]
pub struct LocalStorageBackend;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(feature = "hydrate")]
impl StorageBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?.get_item(key).map_err(|_| StorageError::Unavailable)
    }

    fn write(&self, key: &'static str, value: &str) -> Result<(), StorageError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected { key, reason: format!("{e:?}") })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?.remove_item(key).map_err(|_| StorageError::Unavailable)
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(Option<&str>)>;

/// Single choke point for device storage.
pub struct Store {
    backend: Box<dyn StorageBackend>,
    listeners: RefCell<HashMap<StorageKey, Vec<(u64, Listener)>>>,
    next_listener_id: Cell<u64>,
}

impl Store {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend, listeners: RefCell::default(), next_listener_id: Cell::new(1) }
    }

    pub fn get_raw(&self, key: StorageKey) -> Option<String> {
        match self.backend.read(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                leptos::logging::warn!("storage read failed: key={} error={e}", key.as_str());
                None
            }
        }
    }

    /// Write a raw string and notify subscribers of `key`.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the write is rejected; subscribers are
    /// not notified in that case.
    pub fn set_raw(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.backend.write(key.as_str(), value)?;
        self.notify(key, Some(value));
        Ok(())
    }

    /// Read and decode a JSON value. Undecodable blobs read as `None`.
    pub fn get_json<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                leptos::logging::warn!("storage decode failed: key={} error={e}", key.as_str());
                None
            }
        }
    }

    /// Encode `value` as JSON and write it.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend rejects the write.
    pub fn set_json<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::Encode { key: key.as_str(), reason: e.to_string() })?;
        self.set_raw(key, &raw)
    }

    /// Delete `key` and notify subscribers with `None`.
    ///
    /// # Errors
    ///
    /// Returns the backend error when removal fails.
    pub fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.backend.remove(key.as_str())?;
        self.notify(key, None);
        Ok(())
    }

    /// Register `listener` for changes to `key` made through this store.
    pub fn subscribe(&self, key: StorageKey, listener: impl Fn(Option<&str>) + 'static) -> SubscriptionId {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .entry(key)
            .or_default()
            .push((id, Rc::new(listener)));
        SubscriptionId(id)
    }

    /// Returns `true` if a listener was removed.
    pub fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        for entries in listeners.values_mut() {
            let before = entries.len();
            entries.retain(|(id, _)| *id != subscription.0);
            if entries.len() != before {
                return true;
            }
        }
        false
    }

    fn notify(&self, key: StorageKey, value: Option<&str>) {
        // Snapshot first so listeners may subscribe or write re-entrantly.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .get(&key)
            .map(|entries| entries.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();
        for listener in snapshot {
            listener(value);
        }
    }
}

fn default_backend() -> Box<dyn StorageBackend> {
    #[cfg(feature = "hydrate")]
    {
        Box::new(LocalStorageBackend)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Box::new(MemoryBackend::new())
    }
}

thread_local! {
    static STORE: RefCell<Rc<Store>> = RefCell::new(Rc::new(Store::new(default_backend())));
}

/// Run `f` against this thread's store.
pub fn with_store<R>(f: impl FnOnce(&Store) -> R) -> R {
    let store = STORE.with(|s| Rc::clone(&s.borrow()));
    f(&store)
}

/// Replace this thread's store with a fresh one over `backend`.
pub fn install_backend(backend: Box<dyn StorageBackend>) {
    STORE.with(|s| *s.borrow_mut() = Rc::new(Store::new(backend)));
}

/// Load a JSON value for `key` from the shared store.
pub fn load_json<T: DeserializeOwned>(key: StorageKey) -> Option<T> {
    with_store(|store| store.get_json(key))
}

/// Save a JSON value, logging instead of propagating failures.
///
/// Returns `true` when the write landed.
pub fn save_json<T: Serialize>(key: StorageKey, value: &T) -> bool {
    match with_store(|store| store.set_json(key, value)) {
        Ok(()) => true,
        Err(e) => {
            leptos::logging::warn!("storage write failed: {e}");
            false
        }
    }
}

/// Remove `key`, logging instead of propagating failures.
pub fn clear(key: StorageKey) {
    if let Err(e) = with_store(|store| store.remove(key)) {
        leptos::logging::warn!("storage remove failed: key={} error={e}", key.as_str());
    }
}
