// src/logic/catalog.rs

use std::collections::HashSet;

use itertools::Itertools;
use serde::Deserialize;

use crate::components::combo::Combo;
use crate::error::CatalogError;

/// アプリに同梱しているコンボ一覧。
const BUNDLED_COMBOS_JSON: &str = include_str!("../../data/combos.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    combos: Vec<Combo>,
}

/// 読み込み済みのコンボ一覧 (カタログ) だよ。起動時に一度だけ作って、あとは読むだけ！
#[derive(Debug, Clone, PartialEq)]
pub struct ComboCatalog {
    combos: Vec<Combo>,
}

impl ComboCatalog {
    /// 同梱の data/combos.json から読み込む。
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_COMBOS_JSON)
    }

    /// `{"combos": [...]}` 形式の JSON から読み込んで検証する。
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.combos)
    }

    /// コンボのリストを検証してカタログを作る。
    ///
    /// - 空はダメ
    /// - コンボ名はカタログ内で一意
    /// - 各コンボは2枚以上、カード名の重複なし
    pub fn new(combos: Vec<Combo>) -> Result<Self, CatalogError> {
        if combos.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut names = HashSet::with_capacity(combos.len());
        for combo in &combos {
            if !names.insert(combo.name.as_str()) {
                return Err(CatalogError::DuplicateCombo(combo.name.clone()));
            }
            if combo.cards.len() < 2 {
                return Err(CatalogError::TooFewCards(combo.name.clone()));
            }
            if let Some(card) = combo.cards.iter().duplicates().next() {
                return Err(CatalogError::DuplicateCard {
                    combo: combo.name.clone(),
                    card: card.clone(),
                });
            }
        }

        Ok(Self { combos })
    }

    pub fn combos(&self) -> &[Combo] {
        &self.combos
    }

    pub fn len(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Combo> {
        self.combos.iter().find(|combo| combo.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(name: &str, cards: &[&str]) -> Combo {
        Combo {
            name: name.to_string(),
            description: format!("{} effect", name),
            cards: cards.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn bundled_catalog_is_valid() {
        let catalog = ComboCatalog::bundled().expect("同梱カタログが読めない！");
        assert!(!catalog.is_empty());
        assert!(catalog.get("Splinter Twin").is_some());
        assert!(catalog.combos().iter().all(|c| c.cards.len() >= 2));
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(ComboCatalog::new(vec![]), Err(CatalogError::Empty));
        assert_eq!(ComboCatalog::from_json(r#"{"combos": []}"#), Err(CatalogError::Empty));
    }

    #[test]
    fn rejects_duplicate_combo_names() {
        let result = ComboCatalog::new(vec![combo("A", &["x", "y"]), combo("A", &["z", "w"])]);
        assert_eq!(result, Err(CatalogError::DuplicateCombo("A".to_string())));
    }

    #[test]
    fn rejects_single_card_combos() {
        let result = ComboCatalog::new(vec![combo("Solo", &["x"])]);
        assert_eq!(result, Err(CatalogError::TooFewCards("Solo".to_string())));
    }

    #[test]
    fn rejects_repeated_card_within_combo() {
        let result = ComboCatalog::new(vec![combo("Twice", &["x", "y", "x"])]);
        assert_eq!(
            result,
            Err(CatalogError::DuplicateCard { combo: "Twice".to_string(), card: "x".to_string() })
        );
    }

    #[test]
    fn reports_parse_errors() {
        assert!(matches!(ComboCatalog::from_json("nope"), Err(CatalogError::Parse(_))));
    }
}
