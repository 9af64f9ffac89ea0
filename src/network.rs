// src/network.rs

// このファイルは、カードデータ API (Scryfall) との通信を担当するモジュールだよ！📡
// ブラウザの fetch API を `web_sys` 経由で使って、返ってきた JSON を serde で Card にする。
use futures::future::{try_join, try_join_all, LocalBoxFuture};
use futures::FutureExt;
use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::components::card::Card;
use crate::components::combo::Combo;
use crate::error::FetchError;

/// カードデータの取得元。
///
/// wasm はシングルスレッドなので Future は Send じゃなくていい (LocalBoxFuture)。
/// どの呼び出しも失敗しうるし、リトライはしない。
pub trait CardProvider {
    /// 名前が完全一致するカードを1枚取ってくる。
    fn fetch_by_name<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<Card, FetchError>>;
    /// ランダムなカードを1枚取ってくる。
    fn fetch_random(&self) -> LocalBoxFuture<'_, Result<Card, FetchError>>;
}

/// コンボのカード全部と、埋め合わせのランダムカード `filler_count` 枚をまとめて取ってくる。
///
/// 全部同時に投げて、1つでも失敗したらその時点でエラー。
pub async fn fetch_grid_cards<P: CardProvider + ?Sized>(
    provider: &P,
    combo: &Combo,
    filler_count: usize,
) -> Result<(Vec<Card>, Vec<Card>), FetchError> {
    let combo_cards = try_join_all(combo.cards.iter().map(|name| provider.fetch_by_name(name)));
    let filler = try_join_all((0..filler_count).map(|_| provider.fetch_random()));
    try_join(combo_cards, filler).await
}

/// Scryfall の公開 API を叩くクライアント。認証は不要だよ。
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    base_url: String,
}

impl ScryfallClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    fn named_url(&self, name: &str) -> String {
        let encoded: String = js_sys::encode_uri_component(name).into();
        format!("{}/cards/named?exact={}", self.base_url, encoded)
    }

    fn random_url(&self) -> String {
        format!("{}/cards/random", self.base_url)
    }

    /// GET して、成功したら本文を Card として読む。
    /// 失敗ステータスはそのまま返すので、呼び出し側でエラーの種類を決める。
    async fn get_card(url: &str) -> Result<Result<Card, u16>, FetchError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_to_network)?;
        let window = web_sys::window().ok_or(FetchError::NoWindow)?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_to_network)?;
        let resp: Response = resp_value.dyn_into().map_err(js_to_network)?;

        if !resp.ok() {
            warn!("ScryfallClient: GET {} -> {}", url, resp.status());
            return Ok(Err(resp.status()));
        }

        let text_value = JsFuture::from(resp.text().map_err(js_to_network)?)
            .await
            .map_err(js_to_network)?;
        let text = text_value.as_string().unwrap_or_default();
        let card = serde_json::from_str::<Card>(&text).map_err(|e| FetchError::Decode(e.to_string()))?;
        debug!("ScryfallClient: fetched {} ({})", card.name, card.id);
        Ok(Ok(card))
    }
}

impl CardProvider for ScryfallClient {
    fn fetch_by_name<'a>(&'a self, name: &'a str) -> LocalBoxFuture<'a, Result<Card, FetchError>> {
        async move {
            let url = self.named_url(name);
            match Self::get_card(&url).await? {
                Ok(card) => Ok(card),
                // 名前検索の失敗は、ステータスに関係なく「見つからない」として扱う
                Err(_status) => Err(FetchError::NotFound { name: name.to_string() }),
            }
        }
        .boxed_local()
    }

    fn fetch_random(&self) -> LocalBoxFuture<'_, Result<Card, FetchError>> {
        async move {
            let url = self.random_url();
            match Self::get_card(&url).await? {
                Ok(card) => Ok(card),
                Err(status) => Err(FetchError::Http { status, url }),
            }
        }
        .boxed_local()
    }
}

fn js_to_network(e: JsValue) -> FetchError {
    FetchError::Network(format!("{:?}", e))
}
