// src/components/card.rs

// serde を使う宣言！カードデータは API の JSON から作るし、履歴として保存もするよ！
use serde::{Deserialize, Serialize};

/// 画像 URL のセット。今は `normal` サイズしか使わないよ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    pub normal: String,
}

/// 両面カードなどの「面」ひとつ分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
}

/// カードデータ API から取ってきたカード1枚分のレコードだよ！🃏
///
/// 同じカードかどうかは `id` だけで判断する。
/// コンボの方はカードを `name` で参照するから、答え合わせは名前で行うことになるよ。
/// JSON に知らないフィールドがあっても無視される (serde のデフォルト動作)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
}

impl Card {
    /// id と名前だけのカードを作る。テストや読み込み中のプレースホルダー用。
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_uris: None,
            card_faces: None,
            mana_cost: None,
            type_line: None,
            rarity: None,
        }
    }

    /// 画面に出す名前。両面カードなら1面目の名前を使うよ。
    pub fn display_name(&self) -> &str {
        match self.card_faces.as_deref() {
            Some([first, ..]) => &first.name,
            _ => &self.name,
        }
    }

    /// 表示用の画像 URL。カード本体 → 1面目の順に探して、なければ None。
    pub fn image_url(&self) -> Option<&str> {
        if let Some(uris) = &self.image_uris {
            return Some(&uris.normal);
        }
        self.card_faces
            .as_deref()
            .and_then(|faces| faces.first())
            .and_then(|face| face.image_uris.as_ref())
            .map(|uris| uris.normal.as_str())
    }
}

// --- テスト ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_record_ignores_unknown_fields() {
        let json = r#"{
            "object": "card",
            "id": "abc-123",
            "name": "Splinter Twin",
            "mana_cost": "{2}{R}{R}",
            "type_line": "Enchantment — Aura",
            "rarity": "rare",
            "image_uris": { "small": "s.jpg", "normal": "n.jpg" }
        }"#;
        let card: Card = serde_json::from_str(json).expect("カードの JSON が読めない！");

        assert_eq!(card.id, "abc-123");
        assert_eq!(card.display_name(), "Splinter Twin");
        assert_eq!(card.image_url(), Some("n.jpg"));
        assert_eq!(card.rarity.as_deref(), Some("rare"));
    }

    #[test]
    fn double_faced_card_uses_first_face() {
        let json = r#"{
            "id": "dfc-1",
            "name": "Delver of Secrets // Insectile Aberration",
            "card_faces": [
                { "name": "Delver of Secrets", "image_uris": { "normal": "front.jpg" } },
                { "name": "Insectile Aberration", "image_uris": { "normal": "back.jpg" } }
            ]
        }"#;
        let card: Card = serde_json::from_str(json).expect("両面カードの JSON が読めない！");

        assert_eq!(card.display_name(), "Delver of Secrets");
        assert_eq!(card.image_url(), Some("front.jpg"));
    }

    #[test]
    fn card_without_images_has_no_url() {
        let card = Card::new("x", "Mystery");
        assert_eq!(card.image_url(), None);
        assert_eq!(card.display_name(), "Mystery");
    }
}
