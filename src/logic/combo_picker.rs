// src/logic/combo_picker.rs

use std::collections::BTreeSet;

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::combo::Combo;
use crate::logic::catalog::ComboCatalog;

/// まだ出していないコンボから1つ、一様ランダムに選ぶよ！🎲
///
/// 選んだコンボの名前はその場で `used` に追加する (選ぶことと使用済みにすることはセット)。
/// 全部使い切っていたら、先に `used` を空にしてからカタログ全体から選び直す。
/// カタログが空の時だけ None。
pub fn pick_unused_combo<'a, R: Rng + ?Sized>(
    catalog: &'a ComboCatalog,
    used: &mut BTreeSet<String>,
    rng: &mut R,
) -> Option<&'a Combo> {
    let available: Vec<&Combo> = catalog
        .combos()
        .iter()
        .filter(|combo| !used.contains(&combo.name))
        .collect();

    let picked = if available.is_empty() {
        // 一周した！使用済みをリセットして全体から選ぶ
        info!("ComboPicker: all {} combos used, starting a new cycle", catalog.len());
        used.clear();
        catalog.combos().choose(rng)?
    } else {
        *available.choose(rng)?
    };

    used.insert(picked.name.clone());
    Some(picked)
}
