// src/components/mod.rs

// ゲームで扱うデータの部品たち！ロジックは logic/ 側に置くよ。
pub mod card; // API から取ってくるカード
pub mod combo; // 答えになるコンボ
pub mod round; // 1ラウンド分の状態

pub use card::Card;
pub use combo::Combo;
pub use round::{Round, RoundOutcome};
