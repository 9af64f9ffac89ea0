// src/engine.rs
//! ラウンドの一生を管理するエンジンだよ！🎮
//!
//! コンボを選ぶ → カードを揃える → 選択を受け付ける → 答え合わせ → 次のラウンド。
//! DOM にもネットワークにも直接触らない。カードの取得は `start_round` が
//! ロックを外した状態で行って、結果を `complete_round` で渡す。

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::clock::Clock;
use crate::components::card::Card;
use crate::components::combo::Combo;
use crate::components::round::{Round, RoundOutcome};
use crate::config::game::{GameConfig, CONGRATS_MESSAGES};
use crate::error::{FetchError, RoundError};
use crate::logic::catalog::ComboCatalog;
use crate::logic::deck::{assemble_grid, filler_slots};
use crate::logic::rules::{is_exact_combo, pick_hint_target};
use crate::network::{fetch_grid_cards, CardProvider};
use crate::storage::{HistoryEntry, ProgressManager, ProgressStore, ProgressSummary};
use crate::timers::{ScheduledTimer, TimerId, TimerKind, TimerQueue};

/// ラウンド切り替えアニメーションの段階。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    Idle,
    /// おめでとう表示が終わって、1段目を待っている
    Starting,
    Pile,
    Move,
    Complete,
}

/// タイマー発火の結果、プレゼンテーション層にやってほしいこと。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineSignal {
    /// 状態が変わったので描き直して
    Refresh,
    /// アニメーションの段階が進んだ
    Animate(AnimationPhase),
    /// アニメーションが終わったので次のラウンドを始めて
    StartNextRound,
}

/// `begin_round` が返す「これを取ってきて」のお願い。
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRequest {
    pub generation: u64,
    pub combo: Combo,
    pub filler_count: usize,
}

pub struct RoundEngine<S: ProgressStore> {
    catalog: ComboCatalog,
    progress: ProgressManager<S>,
    config: GameConfig,
    clock: Box<dyn Clock>,
    rng: StdRng,
    round: Option<Round>,
    /// 取得中のコンボ (ラウンドはまだない)
    pending_combo: Option<Combo>,
    in_flight: bool,
    /// ラウンドを作り直すたびに増える。古い取得結果やタイマーを見分けるのに使う
    generation: u64,
    last_error: Option<RoundError>,
    congrats: Option<String>,
    animation: AnimationPhase,
    timers: TimerQueue,
}

impl<S: ProgressStore> RoundEngine<S> {
    pub fn new(
        catalog: ComboCatalog,
        progress: ProgressManager<S>,
        config: GameConfig,
        clock: Box<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            progress,
            config,
            clock,
            rng,
            round: None,
            pending_combo: None,
            in_flight: false,
            generation: 0,
            last_error: None,
            congrats: None,
            animation: AnimationPhase::Idle,
            timers: TimerQueue::new(),
        }
    }

    // --- 読み取り用 ---

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// 今のコンボ。取得中ならこれから出すコンボを返す。
    pub fn active_combo(&self) -> Option<&Combo> {
        self.round.as_ref().map(|round| &round.combo).or(self.pending_combo.as_ref())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&RoundError> {
        self.last_error.as_ref()
    }

    pub fn congrats(&self) -> Option<&str> {
        self.congrats.as_deref()
    }

    pub fn animation(&self) -> AnimationPhase {
        self.animation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn streak(&self) -> u32 {
        self.progress.streak()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.progress.history()
    }

    pub fn progress(&self) -> &ProgressManager<S> {
        &self.progress
    }

    pub fn summary(&self) -> ProgressSummary {
        self.progress.summary(&self.catalog)
    }

    pub fn catalog(&self) -> &ComboCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// ブラウザ側で setTimeout すべきタイマーを受け取る。
    pub fn take_scheduled_timers(&mut self) -> Vec<ScheduledTimer> {
        self.timers.take_scheduled()
    }

    /// ブラウザ側で clearTimeout すべきタイマーを受け取る。
    pub fn take_cancelled_timers(&mut self) -> Vec<TimerId> {
        self.timers.take_cancelled()
    }

    // --- ラウンド開始 ---

    /// ラウンド開始の前半。取得中なら None (2回目の呼び出しは捨てる)。
    ///
    /// 前のラウンドを片付けてから、まだ出していないコンボを選んで使用済みにする。
    pub fn begin_round(&mut self) -> Option<RoundRequest> {
        if self.in_flight {
            debug!("RoundEngine: start_round ignored, a round is already loading");
            return None;
        }
        self.teardown_round();

        let combo = self.progress.pick_combo(&self.catalog, &mut self.rng)?;
        let filler_count = filler_slots(self.config.grid_size, combo.cards.len());
        info!(
            "RoundEngine: round {} picked combo '{}' ({} cards + {} filler)",
            self.generation,
            combo.name,
            combo.cards.len(),
            filler_count
        );

        self.in_flight = true;
        self.pending_combo = Some(combo.clone());
        Some(RoundRequest { generation: self.generation, combo, filler_count })
    }

    /// ラウンド開始の後半。取得結果を受け取って盤面を作る。
    ///
    /// 世代が古い結果は捨てて false を返す。
    pub fn complete_round(
        &mut self,
        request: RoundRequest,
        fetched: Result<(Vec<Card>, Vec<Card>), FetchError>,
    ) -> Result<bool, RoundError> {
        if request.generation != self.generation || !self.in_flight {
            warn!(
                "RoundEngine: discarding stale card fetch (round {}, current {})",
                request.generation, self.generation
            );
            return Ok(false);
        }
        self.in_flight = false;
        self.pending_combo = None;

        match fetched {
            Ok((combo_cards, filler)) => {
                let display_cards = assemble_grid(combo_cards, filler, &mut self.rng);
                info!("RoundEngine: round {} ready with {} cards", self.generation, display_cards.len());
                self.round = Some(Round::new(request.combo, display_cards));
                Ok(true)
            }
            Err(e) => {
                error!("RoundEngine: failed to start round {}: {}", self.generation, e);
                let err = RoundError::from(e);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// 前のラウンドの状態を全部捨てる。予約中のタイマーも取り消す。
    fn teardown_round(&mut self) {
        self.timers.cancel_all();
        self.generation += 1;
        self.round = None;
        self.pending_combo = None;
        self.in_flight = false;
        self.last_error = None;
        self.congrats = None;
        self.animation = AnimationPhase::Idle;
    }

    // --- プレイヤーの操作 ---

    /// カードの選択を切り替える。除外済みのカードやラウンドがない時は何もしない。
    pub fn toggle_card(&mut self, card_id: &str) -> bool {
        match self.round.as_mut() {
            Some(round) => round.toggle(card_id),
            None => false,
        }
    }

    /// 答え合わせ！ラウンドがなければ None。
    ///
    /// 既に正解したラウンドでは何もしない (連勝数を二重に増やさないため)。
    pub fn validate(&mut self) -> Option<RoundOutcome> {
        let round = self.round.as_mut()?;
        if round.outcome == RoundOutcome::Won {
            return Some(RoundOutcome::Won);
        }

        if is_exact_combo(round) {
            round.outcome = RoundOutcome::Won;
            let entry = HistoryEntry {
                combo: round.combo.clone(),
                cards: round.matched_cards(),
                timestamp: self.clock.now_iso(),
            };
            info!("RoundEngine: correct! combo '{}' found", entry.combo.name);
            self.progress.record_win(entry);

            self.timers.cancel_kind(TimerKind::ClearLoss);
            self.congrats = CONGRATS_MESSAGES.choose(&mut self.rng).map(|msg| msg.to_string());
            self.timers.schedule(TimerKind::FinishCongrats, self.config.congrats_ms, self.generation);
            Some(RoundOutcome::Won)
        } else {
            round.outcome = RoundOutcome::Lost;
            debug!("RoundEngine: wrong answer ({} cards selected)", round.selection.len());
            self.progress.record_loss();

            // 連打されたら表示時間を延長する
            self.timers.cancel_kind(TimerKind::ClearLoss);
            self.timers.schedule(TimerKind::ClearLoss, self.config.loss_flash_ms, self.generation);
            Some(RoundOutcome::Lost)
        }
    }

    /// ヒント: コンボに含まれないカードを1枚除外する。1ラウンド1回まで。
    ///
    /// 除外できるカードがなくても、使った扱いになるよ。除外したカードの id を返す。
    pub fn use_hint(&mut self) -> Option<String> {
        let round = self.round.as_mut()?;
        if round.hint_used {
            return None;
        }

        let target = pick_hint_target(round, &mut self.rng).map(|card| card.id.clone());
        round.hint_used = true;

        match target {
            Some(id) => {
                round.eliminated.insert(id.clone());
                round.selection.remove(&id);
                debug!("RoundEngine: hint eliminated card {}", id);
                Some(id)
            }
            None => {
                warn!("RoundEngine: hint used but no wrong card was left to eliminate");
                None
            }
        }
    }

    // --- 進捗のリセット ---

    /// 「新しいゲーム」: メモリ上の進捗だけリセットして、ラウンドを片付ける。
    /// 呼び出し側は続けて新しいラウンドを始めること。
    pub fn new_game(&mut self) {
        info!("RoundEngine: new game (session reset)");
        self.progress.reset_session_only();
        self.teardown_round();
    }

    /// 「進捗リセット」: 保存データごと消す。確認ダイアログは呼び出し側の仕事。
    pub fn reset_progress(&mut self) {
        info!("RoundEngine: resetting all progress");
        self.progress.reset_all_progress();
        self.teardown_round();
    }

    // --- タイマー ---

    /// タイマーが発火した。取り消し済み・古い世代のものは無視する。
    pub fn fire_timer(&mut self, id: TimerId) -> Option<EngineSignal> {
        let timer = self.timers.take_fired(id)?;
        if timer.generation != self.generation {
            debug!("RoundEngine: ignoring stale timer {:?} from round {}", timer.kind, timer.generation);
            return None;
        }

        match timer.kind {
            TimerKind::ClearLoss => {
                let round = self.round.as_mut()?;
                if round.outcome == RoundOutcome::Lost {
                    round.outcome = RoundOutcome::Pending;
                }
                Some(EngineSignal::Refresh)
            }
            TimerKind::FinishCongrats => {
                self.congrats = None;
                if let Some(round) = self.round.as_mut() {
                    round.selection.clear();
                }
                self.animation = AnimationPhase::Starting;
                self.timers.schedule(TimerKind::AnimationPile, self.config.pile_delay_ms, self.generation);
                Some(EngineSignal::Refresh)
            }
            TimerKind::AnimationPile => {
                self.animation = AnimationPhase::Pile;
                self.timers.schedule(TimerKind::AnimationMove, self.config.move_delay_ms, self.generation);
                Some(EngineSignal::Animate(AnimationPhase::Pile))
            }
            TimerKind::AnimationMove => {
                self.animation = AnimationPhase::Move;
                self.timers.schedule(
                    TimerKind::AnimationComplete,
                    self.config.complete_delay_ms,
                    self.generation,
                );
                Some(EngineSignal::Animate(AnimationPhase::Move))
            }
            TimerKind::AnimationComplete => {
                self.animation = AnimationPhase::Complete;
                Some(EngineSignal::StartNextRound)
            }
        }
    }
}

/// エンジンのロックを取る。poison してても中身を使い続ける。
pub fn lock_engine<S: ProgressStore>(engine: &Mutex<RoundEngine<S>>) -> MutexGuard<'_, RoundEngine<S>> {
    match engine.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("RoundEngine mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// ラウンドを始める。
///
/// - `Ok(true)`: 新しいラウンドが遊べる状態になった
/// - `Ok(false)`: 取得中だったので無視された / 取得中に別のラウンドが始まって結果を捨てた
/// - `Err(_)`: カードの取得に失敗した (リトライはプレイヤーの操作で)
///
/// カードを取ってくる間はエンジンのロックを持たないよ。
pub async fn start_round<S, P>(engine: &Arc<Mutex<RoundEngine<S>>>, provider: &P) -> Result<bool, RoundError>
where
    S: ProgressStore,
    P: CardProvider + ?Sized,
{
    let request = match lock_engine(engine).begin_round() {
        Some(request) => request,
        None => return Ok(false),
    };

    let fetched = fetch_grid_cards(provider, &request.combo, request.filler_count).await;

    lock_engine(engine).complete_round(request, fetched)
}
