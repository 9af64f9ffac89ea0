// src/clock.rs

/// 履歴のタイムスタンプ (ISO-8601 文字列) を作るための時計。
pub trait Clock {
    fn now_iso(&self) -> String;
}

/// ブラウザの `Date` を使う時計。wasm32 でしか動かないよ。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_iso(&self) -> String {
        js_sys::Date::new_0().to_iso_string().into()
    }
}

/// いつも同じ時刻を返す時計 (テストや、時刻を固定したい時用)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now_iso(&self) -> String {
        self.0.clone()
    }
}
