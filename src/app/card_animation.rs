// src/app/card_animation.rs
//! 正解した後の「カードを山にして画面外へ飛ばす」アニメーション。
//!
//! 座標の計算は純粋な関数にしておいて、DOM への反映は `apply_phase` だけがやる。

use log::{debug, warn};
use rand::Rng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::config::animation::*;
use crate::engine::AnimationPhase;

/// ビューポートの大きさ (px)。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    fn center_x(&self) -> f64 {
        self.width / 2.0 - CARD_HALF_WIDTH
    }

    fn center_y(&self) -> f64 {
        self.height / 2.0 - CARD_HALF_HEIGHT
    }
}

/// カード1枚に当てるスタイル。
#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub left: f64,
    pub top: f64,
    pub rotate_deg: f64,
    /// 山フェーズだけ設定する (position や transition もこの時に付ける)
    pub z_index: Option<i32>,
}

impl CardStyle {
    /// CSS のプロパティ名と値のペアにする。
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = Vec::with_capacity(7);
        if let Some(z) = self.z_index {
            decls.push(("position", "fixed".to_string()));
            decls.push(("z-index", z.to_string()));
            decls.push(("transition", PILE_TRANSITION.to_string()));
            decls.push(("pointer-events", "none".to_string()));
        }
        decls.push(("left", format!("{}px", self.left)));
        decls.push(("top", format!("{}px", self.top)));
        decls.push(("transform", format!("rotate({}deg)", self.rotate_deg)));
        decls
    }
}

/// 1段目: 画面中央に少しずつずらして重ねる。傾きはランダム。
pub fn pile_layout<R: Rng + ?Sized>(viewport: Viewport, count: usize, rng: &mut R) -> Vec<CardStyle> {
    (0..count)
        .map(|index| {
            let offset = index as f64 * PILE_STEP;
            CardStyle {
                left: viewport.center_x() + offset,
                top: viewport.center_y() + offset,
                rotate_deg: rng.gen_range(-PILE_MAX_TILT_DEG..PILE_MAX_TILT_DEG),
                z_index: Some(PILE_Z_INDEX_BASE + index as i32),
            }
        })
        .collect()
}

/// 2段目: 山ごと右の画面外へ。
pub fn move_layout(viewport: Viewport, count: usize) -> Vec<CardStyle> {
    (0..count)
        .map(|index| CardStyle {
            left: viewport.width + MOVE_OFFSCREEN_MARGIN,
            top: viewport.center_y() + index as f64 * MOVE_STEP,
            rotate_deg: MOVE_ROTATION_DEG,
            z_index: None,
        })
        .collect()
}

/// `[data-card-id]` の要素に今の段階のスタイルを当てる。
///
/// Starting / Complete / Idle では何もしない。
pub fn apply_phase(phase: AnimationPhase) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("Failed to get window")?;
    let document = window.document().ok_or("Failed to get document")?;
    let viewport = Viewport {
        width: window.inner_width()?.as_f64().unwrap_or(0.0),
        height: window.inner_height()?.as_f64().unwrap_or(0.0),
    };

    let nodes = document.query_selector_all("[data-card-id]")?;
    let count = nodes.length() as usize;
    if count == 0 {
        warn!("CardAnimation: no card elements found for {:?}", phase);
        return Ok(());
    }

    let styles = match phase {
        AnimationPhase::Pile => pile_layout(viewport, count, &mut rand::thread_rng()),
        AnimationPhase::Move => move_layout(viewport, count),
        AnimationPhase::Idle | AnimationPhase::Starting | AnimationPhase::Complete => return Ok(()),
    };
    debug!("CardAnimation: applying {:?} to {} cards", phase, count);

    for (index, style) in styles.iter().enumerate() {
        let Some(node) = nodes.get(index as u32) else { continue };
        let element: HtmlElement = match node.dyn_into() {
            Ok(element) => element,
            Err(_) => continue,
        };
        let css = element.style();
        for (property, value) in style.declarations() {
            css.set_property(property, &value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const VIEWPORT: Viewport = Viewport { width: 1200.0, height: 800.0 };

    #[test]
    fn pile_stacks_cards_around_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let styles = pile_layout(VIEWPORT, 7, &mut rng);

        assert_eq!(styles.len(), 7);
        assert_eq!(styles[0].left, 600.0 - CARD_HALF_WIDTH);
        assert_eq!(styles[0].top, 400.0 - CARD_HALF_HEIGHT);
        assert_eq!(styles[3].left, styles[0].left + 6.0);
        assert_eq!(styles[6].z_index, Some(106));
        assert!(styles.iter().all(|s| (-10.0..10.0).contains(&s.rotate_deg)));
    }

    #[test]
    fn move_sends_cards_off_screen() {
        let styles = move_layout(VIEWPORT, 3);
        assert!(styles.iter().all(|s| s.left == 1400.0 && s.rotate_deg == 45.0));
        assert_eq!(styles[2].top - styles[0].top, 10.0);
        assert!(styles.iter().all(|s| s.z_index.is_none()));
    }

    #[test]
    fn pile_declarations_fix_position_and_transition() {
        let style = CardStyle { left: 10.0, top: 20.0, rotate_deg: -3.5, z_index: Some(100) };
        let decls = style.declarations();

        assert!(decls.contains(&("position", "fixed".to_string())));
        assert!(decls.contains(&("transition", "all 1s ease-in-out".to_string())));
        assert!(decls.contains(&("transform", "rotate(-3.5deg)".to_string())));
        assert!(decls.contains(&("left", "10px".to_string())));
    }

    #[test]
    fn move_declarations_only_touch_geometry() {
        let style = CardStyle { left: 1.0, top: 2.0, rotate_deg: 45.0, z_index: None };
        let names: Vec<&str> = style.declarations().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["left", "top", "transform"]);
    }
}
