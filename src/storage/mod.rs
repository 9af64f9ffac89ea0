// src/storage/mod.rs
//! 進捗 (使用済みコンボ・履歴・連勝数) を永続化するためのキーバリューストアだよ。
//!
//! エンジンはストレージに直接触らず、必ず `ProgressManager` 経由で読み書きする。

use std::collections::HashMap;

use crate::error::StorageError;

pub mod local_storage;
pub mod progress;

pub use local_storage::LocalStorageStore;
pub use progress::{HistoryEntry, Progress, ProgressManager, ProgressSummary};

/// 永続キーバリューストアの最小インターフェース。
///
/// 読み込みに失敗したら None を返すこと (呼び出し側は「値なし」と同じ扱いにする)。
/// 書き込みの失敗は Err で返すけど、呼び出し側はログに出すだけで無視するよ。
pub trait ProgressStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// メモリ上だけのストア。ネイティブのテストや、localStorage が使えない時用。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
