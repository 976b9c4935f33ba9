use web_sys::Storage;
use wordcircle::{KeyValueStore, MemoryStore};

/// Settings store backed by `window.localStorage`.
///
/// When localStorage is unavailable (private mode, sandboxed iframe) values
/// live in memory for the rest of the page's lifetime.
pub struct LocalStore {
    storage: Option<Storage>,
    fallback: MemoryStore,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| match w.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::warn!("localStorage unavailable: {err:?}");
                None
            }
        });
        if storage.is_none() {
            log::warn!("settings will not persist across reloads");
        }
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match &self.storage {
            Some(storage) => {
                if let Err(err) = storage.set_item(key, value) {
                    log::warn!("could not write {key}: {err:?}");
                }
            }
            None => self.fallback.set(key, value),
        }
    }
}
