//! 予測APIとの通信

pub mod predict;

pub use predict::predict;

use food_vision_common::api::DEFAULT_ENDPOINT;

/// エンドポイントを上書きするmetaタグ名
const ENDPOINT_META: &str = "food-vision-endpoint";

/// 予測エンドポイントのURL
///
/// `<meta name="food-vision-endpoint" content="...">` があればそれを使う
pub fn endpoint() -> String {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| {
            d.query_selector(&format!("meta[name=\"{}\"]", ENDPOINT_META))
                .ok()
                .flatten()
        })
        .and_then(|meta| meta.get_attribute("content"))
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}
