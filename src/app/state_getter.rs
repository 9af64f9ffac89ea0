//! エンジンの状態を、JS 側で描画しやすい形 (GameSnapshot) に変換して JSON にするよ。

use serde::Serialize;

use crate::components::round::RoundOutcome;
use crate::engine::{AnimationPhase, RoundEngine};
use crate::storage::{ProgressStore, ProgressSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboView {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub selected: bool,
    pub eliminated: bool,
    /// 読み込み中のダミーカード
    pub placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub combo: Option<ComboView>,
    pub cards: Vec<CardView>,
    pub selected_count: usize,
    /// 「答え合わせ」ボタンを押せるか
    pub can_check: bool,
    pub hint_used: bool,
    pub outcome: RoundOutcome,
    pub congrats: Option<String>,
    pub streak: u32,
    pub progress: ProgressSummary,
    pub animation: AnimationPhase,
}

fn placeholder_cards(grid_size: usize) -> Vec<CardView> {
    (0..grid_size)
        .map(|i| CardView {
            id: format!("placeholder-{}", i),
            name: String::new(),
            image_url: None,
            selected: false,
            eliminated: false,
            placeholder: true,
        })
        .collect()
}

pub fn build_snapshot<S: ProgressStore>(engine: &RoundEngine<S>) -> GameSnapshot {
    let round = engine.round();
    let cards = match round {
        Some(round) if !engine.is_loading() => round
            .display_cards
            .iter()
            .map(|card| CardView {
                id: card.id.clone(),
                name: card.display_name().to_string(),
                image_url: card.image_url().map(str::to_string),
                selected: round.selection.contains(&card.id),
                eliminated: round.is_eliminated(&card.id),
                placeholder: false,
            })
            .collect(),
        _ => placeholder_cards(engine.config().grid_size),
    };
    let selected_count = round.map(|r| r.selection.len()).unwrap_or(0);

    GameSnapshot {
        loading: engine.is_loading(),
        error: engine.last_error().map(|e| e.to_string()),
        combo: engine.active_combo().map(|combo| ComboView {
            name: combo.name.clone(),
            description: combo.description.clone(),
        }),
        cards,
        selected_count,
        can_check: selected_count > 0 && !engine.is_loading(),
        hint_used: round.map(|r| r.hint_used).unwrap_or(false),
        outcome: round.map(|r| r.outcome).unwrap_or(RoundOutcome::Pending),
        congrats: engine.congrats().map(str::to_string),
        streak: engine.streak(),
        progress: engine.summary(),
        animation: engine.animation(),
    }
}

pub fn snapshot_json<S: ProgressStore>(engine: &RoundEngine<S>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&build_snapshot(engine))
}

pub fn history_json<S: ProgressStore>(engine: &RoundEngine<S>) -> Result<String, serde_json::Error> {
    serde_json::to_string(engine.history())
}
