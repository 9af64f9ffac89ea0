// src/timers.rs
//! 一時的な UI 状態 (不正解表示、おめでとう表示、アニメーション) 用のタイマー管理。
//!
//! ここは「どのタイマーが予約中か」を覚えておくだけ。
//! 実際の `setTimeout` / `clearTimeout` は app/timer_driver.rs がやるよ。

use std::collections::BTreeMap;

/// タイマーの識別子。エンジンの中で連番で振る。
pub type TimerId = u64;

/// タイマーが発火した時にやること。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 不正解表示を消して Pending に戻す
    ClearLoss,
    /// おめでとう表示を消して、選択を解除してアニメーションへ
    FinishCongrats,
    /// アニメーション1段目: 中央に山にする
    AnimationPile,
    /// アニメーション2段目: 画面外へ飛ばす
    AnimationMove,
    /// アニメーション完了: 次のラウンドへ
    AnimationComplete,
}

/// 予約中のタイマー1つ分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub delay_ms: u32,
    /// 予約した時のラウンド世代。世代が変わっていたら発火しても無視する
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: TimerId,
    pending: BTreeMap<TimerId, ScheduledTimer>,
    newly_scheduled: Vec<ScheduledTimer>,
    cancelled: Vec<TimerId>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u32, generation: u64) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        let timer = ScheduledTimer { id, kind, delay_ms, generation };
        self.pending.insert(id, timer);
        self.newly_scheduled.push(timer);
        id
    }

    /// 発火したタイマーを取り出す。キャンセル済みや知らない id なら None。
    pub fn take_fired(&mut self, id: TimerId) -> Option<ScheduledTimer> {
        self.pending.remove(&id)
    }

    /// 指定した種類の予約を全部キャンセルする。
    pub fn cancel_kind(&mut self, kind: TimerKind) {
        let ids: Vec<TimerId> = self
            .pending
            .values()
            .filter(|timer| timer.kind == kind)
            .map(|timer| timer.id)
            .collect();
        for id in ids {
            self.cancel(id);
        }
    }

    /// 予約中のタイマーを全部キャンセルする (ラウンドの後片付け)。
    pub fn cancel_all(&mut self) {
        let ids: Vec<TimerId> = self.pending.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }

    fn cancel(&mut self, id: TimerId) {
        if self.pending.remove(&id).is_some() {
            // まだブラウザに渡していないものは、渡す前に消すだけでいい
            let before = self.newly_scheduled.len();
            self.newly_scheduled.retain(|timer| timer.id != id);
            if self.newly_scheduled.len() == before {
                self.cancelled.push(id);
            }
        }
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.values().any(|timer| timer.kind == kind)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// ブラウザ側で setTimeout すべきタイマー。
    pub fn take_scheduled(&mut self) -> Vec<ScheduledTimer> {
        std::mem::take(&mut self.newly_scheduled)
    }

    /// ブラウザ側で clearTimeout すべきタイマー。
    pub fn take_cancelled(&mut self) -> Vec<TimerId> {
        std::mem::take(&mut self.cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduled_timers_are_handed_out_once() {
        let mut queue = TimerQueue::new();
        let a = queue.schedule(TimerKind::ClearLoss, 1000, 1);
        let b = queue.schedule(TimerKind::FinishCongrats, 1000, 1);
        assert_ne!(a, b);

        let scheduled = queue.take_scheduled();
        assert_eq!(scheduled.len(), 2);
        assert!(queue.take_scheduled().is_empty());
        assert_eq!(queue.pending_len(), 2);
    }

    #[test]
    fn fired_timer_is_removed() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(TimerKind::AnimationPile, 100, 3);

        let fired = queue.take_fired(id).expect("予約中のはず");
        assert_eq!(fired.kind, TimerKind::AnimationPile);
        assert_eq!(fired.generation, 3);
        assert!(queue.take_fired(id).is_none(), "2回目は発火しないはず");
    }

    #[test]
    fn cancel_all_reports_timers_already_handed_to_browser() {
        let mut queue = TimerQueue::new();
        let handed = queue.schedule(TimerKind::ClearLoss, 1000, 1);
        queue.take_scheduled();
        let _not_handed = queue.schedule(TimerKind::AnimationMove, 800, 1);

        queue.cancel_all();

        assert_eq!(queue.pending_len(), 0);
        assert_eq!(queue.take_cancelled(), vec![handed]);
        assert!(queue.take_scheduled().is_empty());
        assert!(queue.take_fired(handed).is_none());
    }

    #[test]
    fn cancel_kind_leaves_other_timers() {
        let mut queue = TimerQueue::new();
        queue.schedule(TimerKind::ClearLoss, 1000, 1);
        queue.schedule(TimerKind::FinishCongrats, 1000, 1);

        queue.cancel_kind(TimerKind::ClearLoss);

        assert!(!queue.is_pending(TimerKind::ClearLoss));
        assert!(queue.is_pending(TimerKind::FinishCongrats));
    }
}
