//! Key/value persistence for client-side state.
//!
//! In the browser this is `window.localStorage`. Native runs work on an
//! in-process copy that is seeded from and written back to eframe's
//! persistent [`eframe::Storage`] with [`restore_from`] and [`persist_to`].

#[cfg(target_arch = "wasm32")]
pub fn set_local_storage(key: &str, value: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!("Failed to write local storage key {}", key);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn get_local_storage(key: &str) -> Option<String> {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            return storage.get_item(key).ok().flatten();
        }
    }
    None
}

#[cfg(target_arch = "wasm32")]
pub fn remove_local_storage(key: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::{Mutex, MutexGuard};

#[cfg(not(target_arch = "wasm32"))]
static LOCAL_STORAGE: Mutex<Option<HashMap<String, String>>> = Mutex::new(None);

#[cfg(not(target_arch = "wasm32"))]
fn storage() -> MutexGuard<'static, Option<HashMap<String, String>>> {
    LOCAL_STORAGE.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_local_storage(key: &str, value: &str) {
    storage()
        .get_or_insert_with(HashMap::new)
        .insert(key.to_string(), value.to_string());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_local_storage(key: &str) -> Option<String> {
    storage().as_ref()?.get(key).cloned()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove_local_storage(key: &str) {
    if let Some(map) = storage().as_mut() {
        map.remove(key);
    }
}

/// Seed `key` from eframe's persistent storage. Empty values count as absent.
#[cfg(not(target_arch = "wasm32"))]
pub fn restore_from(storage: &dyn eframe::Storage, key: &str) {
    match storage.get_string(key).filter(|v| !v.is_empty()) {
        Some(value) => set_local_storage(key, &value),
        None => remove_local_storage(key),
    }
}

/// Write `key` back to eframe's persistent storage and flush it.
///
/// eframe storage has no removal, so an absent value is stored as empty.
#[cfg(not(target_arch = "wasm32"))]
pub fn persist_to(storage: &mut dyn eframe::Storage, key: &str) {
    storage.set_string(key, get_local_storage(key).unwrap_or_default());
    storage.flush();
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let key = "storage_test_set_get_remove";
        assert_eq!(get_local_storage(key), None);

        set_local_storage(key, "one");
        assert_eq!(get_local_storage(key).as_deref(), Some("one"));

        set_local_storage(key, "two");
        assert_eq!(get_local_storage(key).as_deref(), Some("two"));

        remove_local_storage(key);
        assert_eq!(get_local_storage(key), None);
    }

    #[derive(Default)]
    struct MemoryStorage {
        values: HashMap<String, String>,
        flushes: usize,
    }

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    #[test]
    fn test_value_survives_restart_through_eframe_storage() {
        let key = "storage_test_restart";
        let mut disk = MemoryStorage::default();

        set_local_storage(key, "jwt-abc");
        persist_to(&mut disk, key);
        assert_eq!(disk.flushes, 1);

        // Simulate a fresh process
        remove_local_storage(key);
        restore_from(&disk, key);
        assert_eq!(get_local_storage(key).as_deref(), Some("jwt-abc"));
    }

    #[test]
    fn test_removed_value_stays_removed_after_restart() {
        let key = "storage_test_removed";
        let mut disk = MemoryStorage::default();
        set_local_storage(key, "jwt-abc");
        persist_to(&mut disk, key);

        remove_local_storage(key);
        persist_to(&mut disk, key);
        assert_eq!(disk.values.get(key).map(String::as_str), Some(""));

        set_local_storage(key, "stale");
        restore_from(&disk, key);
        assert_eq!(get_local_storage(key), None);
    }
}
