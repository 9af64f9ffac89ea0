// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app;
pub mod clock;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod logic;
pub mod network;
pub mod storage;
pub mod timers;

pub use app::game_app::ComboGameApp;
pub use components::{Card, Combo, Round, RoundOutcome};
pub use engine::{start_round, AnimationPhase, EngineSignal, RoundEngine};
pub use error::{CatalogError, FetchError, RoundError, StorageError};
pub use logic::catalog::ComboCatalog;
pub use network::{CardProvider, ScryfallClient};
pub use storage::{HistoryEntry, MemoryStore, ProgressManager, ProgressStore};

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
    log::info!("mtg_combos: panic hook and console logger ready");
}
