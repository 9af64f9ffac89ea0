// src/storage/progress.rs

use std::collections::BTreeSet;

use log::{error, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::card::Card;
use crate::components::combo::Combo;
use crate::config::game::{STORAGE_KEY_HISTORY, STORAGE_KEY_STREAK, STORAGE_KEY_USED_COMBOS};
use crate::logic::catalog::ComboCatalog;
use crate::logic::combo_picker::pick_unused_combo;
use crate::storage::ProgressStore;

/// 正解したラウンドの記録。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub combo: Combo,
    /// 盤面にあったコンボのカード
    pub cards: Vec<Card>,
    /// ISO-8601 形式の時刻
    pub timestamp: String,
}

/// ラウンドをまたいで残る進捗。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    pub used_combo_names: BTreeSet<String>,
    pub history: Vec<HistoryEntry>,
    pub streak: u32,
}

/// 進捗バーに出す数字。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub found: usize,
    pub total: usize,
    pub percentage: f64,
}

impl ProgressSummary {
    pub fn new(found: usize, total: usize) -> Self {
        let percentage = if total > 0 { found as f64 / total as f64 * 100.0 } else { 0.0 };
        Self { found, total, percentage }
    }
}

/// 進捗をメモリに持ちつつ、変更のたびにストアへ書き出す係だよ！💾
///
/// 書き込みはベストエフォート。失敗してもログに出すだけで、呼び出し側には返さない。
pub struct ProgressManager<S: ProgressStore> {
    store: S,
    progress: Progress,
}

impl<S: ProgressStore> ProgressManager<S> {
    /// ストアから3つの値を読み込む。壊れていたり無かったりしたら空/0 にする。
    pub fn load(store: S) -> Self {
        let used_combo_names = store
            .get(STORAGE_KEY_USED_COMBOS)
            .and_then(|raw| decode_or_log::<Vec<String>>(STORAGE_KEY_USED_COMBOS, &raw))
            .map(|names| names.into_iter().collect())
            .unwrap_or_default();
        let history = store
            .get(STORAGE_KEY_HISTORY)
            .and_then(|raw| decode_or_log::<Vec<HistoryEntry>>(STORAGE_KEY_HISTORY, &raw))
            .unwrap_or_default();
        let streak = store
            .get(STORAGE_KEY_STREAK)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(0);

        let progress = Progress { used_combo_names, history, streak };
        info!(
            "ProgressManager: loaded streak={} history={} used={}",
            progress.streak,
            progress.history.len(),
            progress.used_combo_names.len()
        );
        Self { store, progress }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn streak(&self) -> u32 {
        self.progress.streak
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.progress.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn summary(&self, catalog: &ComboCatalog) -> ProgressSummary {
        ProgressSummary::new(self.progress.history.len(), catalog.len())
    }

    /// 次のコンボを選んで、使用済みとして保存する。
    pub fn pick_combo<R: Rng + ?Sized>(&mut self, catalog: &ComboCatalog, rng: &mut R) -> Option<Combo> {
        let combo = pick_unused_combo(catalog, &mut self.progress.used_combo_names, rng).cloned();
        self.save_used();
        combo
    }

    /// 正解: 連勝数を +1 して履歴に追加。
    pub fn record_win(&mut self, entry: HistoryEntry) {
        self.progress.streak = self.progress.streak.saturating_add(1);
        self.progress.history.push(entry);
        self.save_streak();
        self.save_history();
    }

    /// 不正解: 連勝数を 0 に戻す。
    pub fn record_loss(&mut self) {
        self.progress.streak = 0;
        self.save_streak();
    }

    /// 「新しいゲーム」用。メモリ上の進捗だけ消して、ストアには触らない。
    pub fn reset_session_only(&mut self) {
        self.progress = Progress::default();
    }

    /// 「進捗リセット」用。ストアの3つのキーを消して、メモリ上もまっさらにする。
    pub fn reset_all_progress(&mut self) {
        for key in [STORAGE_KEY_USED_COMBOS, STORAGE_KEY_HISTORY, STORAGE_KEY_STREAK] {
            if let Err(e) = self.store.remove(key) {
                error!("Error clearing {} from storage: {}", key, e);
            }
        }
        self.progress = Progress::default();
    }

    fn save_used(&mut self) {
        let names: Vec<&String> = self.progress.used_combo_names.iter().collect();
        let encoded = serde_json::to_string(&names);
        self.write_encoded(STORAGE_KEY_USED_COMBOS, encoded);
    }

    fn save_history(&mut self) {
        let encoded = serde_json::to_string(&self.progress.history);
        self.write_encoded(STORAGE_KEY_HISTORY, encoded);
    }

    fn save_streak(&mut self) {
        let value = self.progress.streak.to_string();
        self.write(STORAGE_KEY_STREAK, &value);
    }

    fn write_encoded(&mut self, key: &str, encoded: serde_json::Result<String>) {
        match encoded {
            Ok(json) => self.write(key, &json),
            Err(e) => error!("Error serializing {}: {}", key, e),
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            error!("Error saving {} to storage: {}", key, e);
        }
    }
}

fn decode_or_log<T: for<'de> Deserialize<'de>>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Error loading {} from storage: {}", key, e);
            None
        }
    }
}
