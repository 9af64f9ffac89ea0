// src/storage/local_storage.rs
//! ブラウザの localStorage を使うストア。

use log::{error, warn};
use web_sys::Storage;

use crate::error::StorageError;
use crate::storage::ProgressStore;

/// `window.localStorage` のラッパーだよ。
///
/// プライベートブラウズなどで localStorage が取れない時は `storage` が None になって、
/// 読み込みは全部「値なし」、書き込みは全部エラー (呼び出し側で無視される) になる。
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => Some(storage),
            Some(Ok(None)) => {
                warn!("LocalStorageStore: localStorage is not available, progress will not be saved");
                None
            }
            Some(Err(e)) => {
                error!("LocalStorageStore: failed to access localStorage: {:?}", e);
                None
            }
            None => {
                warn!("LocalStorageStore: no window, progress will not be saved");
                None
            }
        };
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))
    }
}

impl ProgressStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                error!("Error loading {} from localStorage: {:?}", key, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

// ブラウザでしか動かないので wasm32 の時だけコンパイルするよ
#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn local_storage_round_trip() {
        let mut store = LocalStorageStore::open();
        assert!(store.is_available());

        store.set("mtg-combos-test", "42").expect("書き込めるはず");
        assert_eq!(store.get("mtg-combos-test").as_deref(), Some("42"));

        store.remove("mtg-combos-test").expect("削除できるはず");
        assert_eq!(store.get("mtg-combos-test"), None);
    }
}
