// src/app/timer_driver.rs
//! エンジンが予約したタイマーを、ブラウザの setTimeout / clearTimeout に写すよ。
//!
//! エンジンの操作のあとは必ず `sync_timers` を呼ぶこと。

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::app::card_animation;
use crate::app::game_app::{spawn_round_start, AppHandles};
use crate::engine::{lock_engine, EngineSignal};
use crate::timers::TimerId;

/// 取り消されたタイマーを clearTimeout して、新しいタイマーを setTimeout する。
pub(crate) fn sync_timers(handles: &AppHandles) {
    let (cancelled, scheduled) = {
        let mut engine = lock_engine(&handles.engine);
        (engine.take_cancelled_timers(), engine.take_scheduled_timers())
    };
    if cancelled.is_empty() && scheduled.is_empty() {
        return;
    }

    let window = match web_sys::window() {
        Some(window) => window,
        None => {
            error!("TimerDriver: no window, {} timers dropped", scheduled.len());
            return;
        }
    };
    let mut timeouts = match handles.timeouts.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };

    for id in cancelled {
        if let Some(handle) = timeouts.remove(&id) {
            window.clear_timeout_with_handle(handle);
            debug!("TimerDriver: cleared timer {}", id);
        }
    }

    for timer in scheduled {
        let handles_clone = handles.clone();
        let id = timer.id;
        // 1回呼ばれたら自分で解放されるクロージャ
        let callback = Closure::once_into_js(move || on_timer_fired(&handles_clone, id));
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            timeout_delay(timer.delay_ms),
        ) {
            Ok(handle) => {
                debug!("TimerDriver: {:?} scheduled in {}ms (timer {})", timer.kind, timer.delay_ms, id);
                timeouts.insert(id, handle);
            }
            Err(e) => error!("TimerDriver: setTimeout failed for {:?}: {:?}", timer.kind, e),
        }
    }
}

/// setTimeout に渡す待ち時間。i32 に収まらない値は上限に丸める。
fn timeout_delay(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}

fn on_timer_fired(handles: &AppHandles, id: TimerId) {
    if let Ok(mut timeouts) = handles.timeouts.lock() {
        timeouts.remove(&id);
    }

    let signal = lock_engine(&handles.engine).fire_timer(id);
    sync_timers(handles);

    match signal {
        None => {}
        Some(EngineSignal::Refresh) => handles.notify(),
        // 描画し直すとスタイルが消えるので、ここでは通知しない
        Some(EngineSignal::Animate(phase)) => {
            if let Err(e) = card_animation::apply_phase(phase) {
                error!("TimerDriver: animation {:?} failed: {:?}", phase, e);
            }
        }
        Some(EngineSignal::StartNextRound) => spawn_round_start(handles),
    }
}
