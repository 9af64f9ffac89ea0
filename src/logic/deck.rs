// src/logic/deck.rs

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::card::Card;

/// 盤面を埋めるのに必要なランダムカードの枚数だよ。
/// コンボのカードが盤面より多い時は 0 (マイナスにはしない)。
pub fn filler_slots(grid_size: usize, combo_card_count: usize) -> usize {
    grid_size.saturating_sub(combo_card_count)
}

/// コンボのカードと埋め合わせのカードをまとめて、表示用にシャッフルする関数だよ！🃏
///
/// シャッフルは `SliceRandom::shuffle` (Fisher-Yates) なので、並び順はどれも同じ確率になる。
pub fn assemble_grid<R: Rng + ?Sized>(combo_cards: Vec<Card>, filler: Vec<Card>, rng: &mut R) -> Vec<Card> {
    let mut grid = combo_cards;
    grid.extend(filler);
    grid.shuffle(rng);
    grid
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn cards(prefix: &str, n: usize) -> Vec<Card> {
        (0..n).map(|i| Card::new(format!("{}-{}", prefix, i), format!("{} {}", prefix, i))).collect()
    }

    #[test]
    fn filler_slots_never_negative() {
        assert_eq!(filler_slots(7, 2), 5);
        assert_eq!(filler_slots(7, 7), 0);
        assert_eq!(filler_slots(7, 9), 0);
    }

    #[test]
    fn grid_keeps_every_card_exactly_once() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = assemble_grid(cards("combo", 2), cards("filler", 5), &mut rng);

        assert_eq!(grid.len(), 7);
        let ids: HashSet<&str> = grid.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 7, "同じカードが2回入ってる！");
        assert!(ids.contains("combo-0") && ids.contains("combo-1"));
    }

    #[test]
    fn shuffle_moves_combo_cards_around() {
        // 何回か並べると、コンボのカードが先頭以外にも来るはず
        let mut rng = StdRng::seed_from_u64(11);
        let moved = (0..20).any(|_| {
            let grid = assemble_grid(cards("combo", 2), cards("filler", 5), &mut rng);
            grid[0].id != "combo-0"
        });
        assert!(moved, "シャッフルしても順番が変わってない");
    }
}
