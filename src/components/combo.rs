// src/components/combo.rs

use serde::{Deserialize, Serialize};

/// コンボ (一緒に使うと決まった効果が出るカードの組み合わせ) の定義だよ。
///
/// 1ラウンドの「答え」になる。カタログから読み込んだら後は変更しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    /// カタログ内で一意な名前
    pub name: String,
    /// プレイヤーに見せる効果の説明
    pub description: String,
    /// 必要なカード名 (2枚以上、重複なし)
    pub cards: Vec<String>,
}

impl Combo {
    /// このカード名がコンボに含まれるか。
    pub fn requires(&self, card_name: &str) -> bool {
        self.cards.iter().any(|name| name == card_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_matches_exact_names_only() {
        let combo = Combo {
            name: "Twin".to_string(),
            description: "Infinite hasty tokens".to_string(),
            cards: vec!["Splinter Twin".to_string(), "Pestermite".to_string()],
        };
        assert!(combo.requires("Pestermite"));
        assert!(!combo.requires("pestermite"));
        assert!(!combo.requires("Deceiver Exarch"));
    }
}
