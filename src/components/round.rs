// src/components/round.rs

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::components::card::Card;
use crate::components::combo::Combo;

/// 答え合わせの結果だよ！
///
/// 新しいラウンドでは必ず Pending から始まる。
/// Lost は一時的な状態で、少し経つとタイマーで Pending に戻る。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    Pending,
    Won,
    Lost,
}

/// 1ラウンド分の状態。エンジンだけが持っていて、次のラウンドが始まったら丸ごと捨てる。
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub combo: Combo,
    /// 表示順は決まったら変えない
    pub display_cards: Vec<Card>,
    pub selection: BTreeSet<String>,
    /// ヒントで除外されたカードの id (1ラウンドで最大1枚)
    pub eliminated: BTreeSet<String>,
    pub hint_used: bool,
    pub outcome: RoundOutcome,
}

impl Round {
    pub fn new(combo: Combo, display_cards: Vec<Card>) -> Self {
        Self {
            combo,
            display_cards,
            selection: BTreeSet::new(),
            eliminated: BTreeSet::new(),
            hint_used: false,
            outcome: RoundOutcome::Pending,
        }
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.display_cards.iter().find(|card| card.id == card_id)
    }

    pub fn is_eliminated(&self, card_id: &str) -> bool {
        self.eliminated.contains(card_id)
    }

    /// カードの選択を切り替える。変化があったら true。
    ///
    /// 除外済みのカードと盤面にない id は無視するよ。
    pub fn toggle(&mut self, card_id: &str) -> bool {
        if self.is_eliminated(card_id) || self.card(card_id).is_none() {
            return false;
        }
        if !self.selection.remove(card_id) {
            self.selection.insert(card_id.to_string());
        }
        true
    }

    /// 盤面のうちコンボに含まれるカード (履歴に残す分)。
    pub fn matched_cards(&self) -> Vec<Card> {
        self.display_cards
            .iter()
            .filter(|card| self.combo.requires(&card.name))
            .cloned()
            .collect()
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_round() -> Round {
        let combo = Combo {
            name: "Twin".to_string(),
            description: "Infinite tokens".to_string(),
            cards: vec!["Splinter Twin".to_string(), "Pestermite".to_string()],
        };
        let cards = vec![
            Card::new("a", "Splinter Twin"),
            Card::new("b", "Forest"),
            Card::new("c", "Pestermite"),
        ];
        Round::new(combo, cards)
    }

    #[test]
    fn new_round_starts_clean() {
        let round = sample_round();
        assert!(round.selection.is_empty());
        assert!(round.eliminated.is_empty());
        assert!(!round.hint_used);
        assert_eq!(round.outcome, RoundOutcome::Pending);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut round = sample_round();
        assert!(round.toggle("a"));
        assert!(round.selection.contains("a"));
        assert!(round.toggle("a"));
        assert!(!round.selection.contains("a"));
    }

    #[test]
    fn toggle_ignores_eliminated_and_unknown_cards() {
        let mut round = sample_round();
        round.eliminated.insert("b".to_string());

        assert!(!round.toggle("b"), "除外済みカードは選べないはず");
        assert!(!round.toggle("zzz"), "盤面にない id は無視するはず");
        assert!(round.selection.is_empty());
    }

    #[test]
    fn matched_cards_keeps_display_order() {
        let round = sample_round();
        let matched = round.matched_cards();
        let ids: Vec<&str> = matched.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn outcome_serializes_in_snake_case() {
        assert_eq!(serde_json::to_string(&RoundOutcome::Won).unwrap(), "\"won\"");
    }
}
