// src/app/game_app.rs

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::{init_handler, state_getter, timer_driver};
use crate::clock::BrowserClock;
use crate::components::RoundOutcome;
use crate::config::game::GameConfig;
use crate::engine::{lock_engine, RoundEngine};
use crate::network::{fetch_grid_cards, ScryfallClient};
use crate::storage::LocalStorageStore;
use crate::timers::TimerId;

/// タイマーのコールバックや非同期処理に持ち回る共有ハンドル。
#[derive(Clone)]
pub(crate) struct AppHandles {
    pub(crate) engine: Arc<Mutex<RoundEngine<LocalStorageStore>>>,
    pub(crate) provider: Arc<ScryfallClient>,
    /// エンジンのタイマー id → setTimeout のハンドル
    pub(crate) timeouts: Arc<Mutex<HashMap<TimerId, i32>>>,
    listener: Arc<Mutex<Option<js_sys::Function>>>,
}

impl AppHandles {
    /// 状態が変わったことを JS 側に知らせる。
    pub(crate) fn notify(&self) {
        let callback = match self.listener.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if let Some(callback) = callback {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                error!("GameApp: change listener threw: {:?}", e);
            }
        }
    }
}

/// 新しいラウンドを始める。取得中ならエンジンが無視する。
///
/// 読み込み中の表示を出してから、カードの取得を裏で進めるよ。
pub(crate) fn spawn_round_start(handles: &AppHandles) {
    let request = match lock_engine(&handles.engine).begin_round() {
        Some(request) => request,
        None => return,
    };
    timer_driver::sync_timers(handles);
    handles.notify();

    let handles = handles.clone();
    spawn_local(async move {
        let fetched = fetch_grid_cards(&*handles.provider, &request.combo, request.filler_count).await;
        let result = lock_engine(&handles.engine).complete_round(request, fetched);
        if let Err(e) = result {
            error!("GameApp: round failed to load: {}", e);
        }
        handles.notify();
    });
}

// --- JS から使うゲーム本体 ---
#[wasm_bindgen]
pub struct ComboGameApp {
    handles: AppHandles,
}

#[wasm_bindgen]
impl ComboGameApp {
    /// `config_json` は GameConfig の JSON (省略可)。
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ComboGameApp, JsValue> {
        info!("GameApp: initializing...");
        let config = GameConfig::from_json_or_default(config_json.as_deref());
        let provider = ScryfallClient::new(config.api_base.clone());
        let engine = init_handler::build_engine(config, LocalStorageStore::open(), Box::new(BrowserClock))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            handles: AppHandles {
                engine: Arc::new(Mutex::new(engine)),
                provider: Arc::new(provider),
                timeouts: Arc::new(Mutex::new(HashMap::new())),
                listener: Arc::new(Mutex::new(None)),
            },
        })
    }

    /// 状態が変わるたびに呼ばれるコールバックを登録する。
    pub fn set_on_change(&self, callback: js_sys::Function) {
        match self.handles.listener.lock() {
            Ok(mut guard) => *guard = Some(callback),
            Err(poisoned) => *poisoned.into_inner() = Some(callback),
        }
    }

    /// 最初のラウンド、またはエラー後の「もう一度」。
    pub fn start_round(&self) {
        spawn_round_start(&self.handles);
    }

    pub fn toggle_card(&self, card_id: &str) -> bool {
        let changed = lock_engine(&self.handles.engine).toggle_card(card_id);
        if changed {
            self.handles.notify();
        }
        changed
    }

    /// 答え合わせ。結果は "won" / "lost"、ラウンドがなければ undefined。
    pub fn check_answer(&self) -> Option<String> {
        let outcome = lock_engine(&self.handles.engine).validate();
        timer_driver::sync_timers(&self.handles);
        self.handles.notify();
        outcome.map(|o| match o {
            RoundOutcome::Won => "won".to_string(),
            RoundOutcome::Lost => "lost".to_string(),
            RoundOutcome::Pending => "pending".to_string(),
        })
    }

    /// ヒントで除外したカードの id。
    pub fn use_hint(&self) -> Option<String> {
        let eliminated = lock_engine(&self.handles.engine).use_hint();
        self.handles.notify();
        eliminated
    }

    pub fn new_game(&self) {
        lock_engine(&self.handles.engine).new_game();
        timer_driver::sync_timers(&self.handles);
        spawn_round_start(&self.handles);
    }

    /// 保存データごと消す。確認は JS 側で済ませておくこと。
    pub fn reset_progress(&self) {
        lock_engine(&self.handles.engine).reset_progress();
        timer_driver::sync_timers(&self.handles);
        spawn_round_start(&self.handles);
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        let engine = lock_engine(&self.handles.engine);
        state_getter::snapshot_json(&*engine).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn history_json(&self) -> Result<String, JsValue> {
        let engine = lock_engine(&self.handles.engine);
        state_getter::history_json(&*engine).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
