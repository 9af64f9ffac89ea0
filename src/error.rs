// src/error.rs
//! クレート全体で使うエラー型をまとめておくところだよ。

use thiserror::Error;

/// カードデータ API からの取得に失敗した時のエラー。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// 名前検索で完全一致するカードが見つからなかった (404 とか)
    #[error("Failed to fetch card: {name}")]
    NotFound { name: String },
    /// ランダムカード取得などで 2xx 以外が返ってきた
    #[error("HTTP error! status: {status}")]
    Http { status: u16, url: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode card record: {0}")]
    Decode(String),
    #[error("no window available")]
    NoWindow,
}

/// コンボ一覧 (combos.json) の読み込み・検証エラー。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("failed to parse combo catalog: {0}")]
    Parse(String),
    #[error("combo catalog is empty")]
    Empty,
    #[error("duplicate combo name: {0}")]
    DuplicateCombo(String),
    #[error("combo {0} needs at least two cards")]
    TooFewCards(String),
    #[error("combo {combo} lists {card} more than once")]
    DuplicateCard { combo: String, card: String },
}

/// 永続ストレージのエラー。呼び出し側でログに出して握りつぶす前提！
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}

/// ラウンド開始の失敗。エンジンからプレゼンテーション層へ渡る唯一のエラーだよ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
