// src/config/animation.rs
//! ラウンド切り替えアニメーションの座標に関する定数を定義するよ！
//! 山に集める位置のオフセットや、回転角度など。

pub const CARD_HALF_WIDTH: f64 = 112.0; // カード画像の幅の半分 (中央寄せ用)
pub const CARD_HALF_HEIGHT: f64 = 156.0; // カード画像の高さの半分

// --- 山 (pile) フェーズ ---
pub const PILE_STEP: f64 = 2.0; // 山の中でカードを少しずつずらす量
pub const PILE_MAX_TILT_DEG: f64 = 10.0; // 山のカードの傾き (±この角度まで)
pub const PILE_Z_INDEX_BASE: i32 = 100; // 山のカードの重なり順の開始値
pub const PILE_TRANSITION: &str = "all 1s ease-in-out";

// --- 画面外へ飛ばす (move) フェーズ ---
pub const MOVE_OFFSCREEN_MARGIN: f64 = 200.0; // 画面の右端からさらにこれだけ外へ
pub const MOVE_STEP: f64 = 5.0; // 飛んでいくカード同士の縦方向のずれ
pub const MOVE_ROTATION_DEG: f64 = 45.0;
