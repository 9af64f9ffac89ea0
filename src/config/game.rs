// src/config/game.rs
//! ゲーム進行に関する定数と、JS 側から上書きできる設定 (GameConfig) だよ！

use log::warn;
use serde::Deserialize;

pub const GRID_SIZE: usize = 7; // 盤面に並べるカードの枚数
pub const LOSS_FLASH_MS: u32 = 1000; // 不正解表示が消えるまで
pub const CONGRATS_MS: u32 = 1000; // おめでとう表示からアニメーション開始まで
pub const PILE_DELAY_MS: u32 = 100; // アニメーション: 中央に集めるまで
pub const MOVE_DELAY_MS: u32 = 800; // アニメーション: 画面外へ飛ばすまで
pub const COMPLETE_DELAY_MS: u32 = 1000; // アニメーション: 完了して次のラウンドへ

pub const SCRYFALL_API_BASE: &str = "https://api.scryfall.com";

// --- localStorage のキー ---
pub const STORAGE_KEY_USED_COMBOS: &str = "mtg-combos-used";
pub const STORAGE_KEY_HISTORY: &str = "mtg-combos-history";
pub const STORAGE_KEY_STREAK: &str = "mtg-combos-streak";

pub const CONGRATS_MESSAGES: [&str; 11] = [
    "Great job!",
    "Combo Master!",
    "Well done, Planeswalker!",
    "You nailed it!",
    "Well played!",
    "Impressive!",
    "That's a win!",
    "You found the combo!",
    "Victory!",
    "Excellent!",
    "You got it!",
];

/// 実行時に差し替えられる設定値。
///
/// 省略されたフィールドはデフォルト (上の定数) になるよ。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid_size: usize,
    pub loss_flash_ms: u32,
    pub congrats_ms: u32,
    pub pile_delay_ms: u32,
    pub move_delay_ms: u32,
    pub complete_delay_ms: u32,
    pub api_base: String,
    /// 乱数のシード。None ならブラウザの乱数源から作る
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            loss_flash_ms: LOSS_FLASH_MS,
            congrats_ms: CONGRATS_MS,
            pile_delay_ms: PILE_DELAY_MS,
            move_delay_ms: MOVE_DELAY_MS,
            complete_delay_ms: COMPLETE_DELAY_MS,
            api_base: SCRYFALL_API_BASE.to_string(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// JSON 文字列から設定を読む。壊れてたら警告を出してデフォルトに戻すよ。
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!("GameConfig: invalid config JSON ({}), using defaults", e);
                Self::default()
            }),
        }
    }
}
