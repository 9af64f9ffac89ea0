// src/app/init_handler.rs
//! ComboGameApp の初期化まわり。エンジンを組み立てるだけで、通信はまだしない。

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::Clock;
use crate::config::game::GameConfig;
use crate::engine::RoundEngine;
use crate::error::CatalogError;
use crate::logic::catalog::ComboCatalog;
use crate::storage::{ProgressManager, ProgressStore};

/// シードがあれば固定の乱数、なければブラウザの乱数源から。
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("App::Init: using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}

/// 同梱のコンボ一覧と保存済みの進捗から RoundEngine を作る。
pub(crate) fn build_engine<S: ProgressStore>(
    config: GameConfig,
    store: S,
    clock: Box<dyn Clock>,
) -> Result<RoundEngine<S>, CatalogError> {
    let catalog = ComboCatalog::bundled()?;
    let progress = ProgressManager::load(store);
    let rng = make_rng(config.seed);
    info!(
        "App::Init: {} combos in catalog, {} already found",
        catalog.len(),
        progress.history().len()
    );
    Ok(RoundEngine::new(catalog, progress, config, clock, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStore;
    use rand::Rng;

    #[test]
    fn same_seed_gives_same_sequence() {
        let a: Vec<u32> = make_rng(Some(9)).sample_iter(rand::distributions::Standard).take(4).collect();
        let b: Vec<u32> = make_rng(Some(9)).sample_iter(rand::distributions::Standard).take(4).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn engine_starts_idle_with_bundled_catalog() {
        let config = GameConfig { seed: Some(1), ..GameConfig::default() };
        let engine = build_engine(config, MemoryStore::new(), Box::new(FixedClock(String::new())))
            .expect("同梱データは正しいはず");

        assert!(engine.round().is_none());
        assert!(!engine.is_loading());
        assert_eq!(engine.summary().found, 0);
        assert!(engine.catalog().len() >= 10);
    }
}
