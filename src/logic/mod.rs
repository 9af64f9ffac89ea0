// src/logic/mod.rs

// World や DOM に触らない、純粋なゲームロジックをここに集めるよ！
pub mod catalog; // コンボ一覧の読み込みと検証
pub mod combo_picker; // 出題するコンボの選択 (一周するまで重複なし)
pub mod deck; // 盤面のカードを揃えてシャッフル
pub mod rules; // 答え合わせとヒント
