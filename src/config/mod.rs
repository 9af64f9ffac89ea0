// src/config/mod.rs

pub mod game; // ゲームの定数と GameConfig
pub mod animation; // ラウンド切り替えアニメーションの座標定数
