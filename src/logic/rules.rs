//! 答え合わせとヒントのルール判定をまとめるモジュールだよ！✅
//!
//! どれも `Round` を読むだけの純粋な関数。状態の更新はエンジン側でやる。

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::card::Card;
use crate::components::round::Round;

/// 選択中のカード id を、盤面のカード名に変換する。
///
/// 盤面にない id は空文字になる (本来起きないはず)。
pub fn selected_names(round: &Round) -> Vec<&str> {
    round
        .selection
        .iter()
        .map(|id| round.card(id).map(|card| card.name.as_str()).unwrap_or(""))
        .collect()
}

/// 選んだカードがコンボとぴったり一致するかチェックする。
///
/// 1. コンボのカード名が全部選ばれている
/// 2. 選ばれたカード名は全部コンボのもの
/// 3. 枚数が同じ
///
/// 名前で比較しているので、埋め合わせのカードがコンボのカードと同名だと
/// 間違った方を選んでも正解になりうる。
pub fn is_exact_combo(round: &Round) -> bool {
    let names = selected_names(round);
    let required = &round.combo.cards;

    required.iter().all(|name| names.contains(&name.as_str()))
        && names.iter().all(|name| round.combo.requires(name))
        && names.len() == required.len()
}

/// ヒントで除外できるカード (コンボに含まれない & まだ除外されていない)。
pub fn hint_candidates(round: &Round) -> Vec<&Card> {
    round
        .display_cards
        .iter()
        .filter(|card| !round.combo.requires(&card.name))
        .filter(|card| !round.is_eliminated(&card.id))
        .collect()
}

/// 候補の中から1枚ランダムに選ぶ。候補がなければ None。
pub fn pick_hint_target<'a, R: Rng + ?Sized>(round: &'a Round, rng: &mut R) -> Option<&'a Card> {
    hint_candidates(round).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::combo::Combo;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Splinter Twin + Pestermite と埋め合わせ5枚
    fn twin_round() -> Round {
        let combo = Combo {
            name: "Splinter Twin".to_string(),
            description: "Infinite hasty tokens".to_string(),
            cards: vec!["Splinter Twin".to_string(), "Pestermite".to_string()],
        };
        let cards = vec![
            Card::new("f1", "Forest"),
            Card::new("twin", "Splinter Twin"),
            Card::new("f2", "Island"),
            Card::new("f3", "Swamp"),
            Card::new("pest", "Pestermite"),
            Card::new("f4", "Plains"),
            Card::new("f5", "Mountain"),
        ];
        Round::new(combo, cards)
    }

    fn select(round: &mut Round, ids: &[&str]) {
        for id in ids {
            round.selection.insert(id.to_string());
        }
    }

    #[test]
    fn exact_selection_wins() {
        let mut round = twin_round();
        select(&mut round, &["twin", "pest"]);
        assert!(is_exact_combo(&round));
    }

    #[test]
    fn extra_filler_loses() {
        let mut round = twin_round();
        select(&mut round, &["twin", "pest", "f3"]);
        assert!(!is_exact_combo(&round));
    }

    #[test]
    fn partial_selection_loses() {
        let mut round = twin_round();
        select(&mut round, &["pest"]);
        assert!(!is_exact_combo(&round));
    }

    #[test]
    fn empty_selection_loses() {
        assert!(!is_exact_combo(&twin_round()));
    }

    #[test]
    fn unknown_id_maps_to_empty_name() {
        let mut round = twin_round();
        select(&mut round, &["twin", "ghost"]);
        // selection は BTreeSet なので "ghost" が先
        assert_eq!(selected_names(&round), vec!["", "Splinter Twin"]);
        assert!(!is_exact_combo(&round));
    }

    #[test]
    fn same_name_filler_is_accepted() {
        // 同名カードの衝突: 名前ベースの判定なので通ってしまう (既知の挙動)
        let mut round = twin_round();
        round.display_cards[0] = Card::new("twin-reprint", "Splinter Twin");
        select(&mut round, &["twin-reprint", "pest"]);
        assert!(is_exact_combo(&round));
    }

    #[test]
    fn hint_candidates_exclude_combo_and_eliminated_cards() {
        let mut round = twin_round();
        round.eliminated.insert("f1".to_string());

        let ids: Vec<&str> = hint_candidates(&round).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["f2", "f3", "f4", "f5"]);
    }

    #[test]
    fn hint_target_is_never_a_combo_card() {
        let round = twin_round();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let target = pick_hint_target(&round, &mut rng).expect("候補があるはず");
            assert!(!round.combo.requires(&target.name));
        }
    }

    #[test]
    fn no_hint_target_when_only_combo_cards_remain() {
        let mut round = twin_round();
        round.display_cards.retain(|c| round.combo.requires(&c.name));
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_hint_target(&round, &mut rng).is_none());
    }
}
