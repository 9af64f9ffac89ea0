// src/app/mod.rs
//! ブラウザとつなぐ部分 (ComboGameApp) を役割ごとに分割して置くモジュールだよ！

pub mod card_animation;
pub mod game_app;
pub mod init_handler;
pub mod state_getter;
pub mod timer_driver;
