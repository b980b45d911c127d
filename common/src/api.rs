//! 予測APIのエンドポイント定義

/// デフォルトの予測エンドポイント
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/predict";

/// multipartのフィールド名
pub const IMAGE_FIELD: &str = "image";

/// デフォルトのタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// サーバーがメッセージを返さなかった場合の汎用メッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze image";

pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

const PREDICT_PATH: &str = "/api/predict";
const HEALTH_PATH: &str = "/api/health";

/// ステータスコードが2xxか
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// 予測エンドポイントからヘルスチェックURLを導出
///
/// `.../api/predict` なら `.../api/health` に置き換え、
/// それ以外はベースURLとみなして末尾に `/api/health` を付ける
pub fn health_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim_end_matches('/');
    match trimmed.strip_suffix(PREDICT_PATH) {
        Some(base) => format!("{}{}", base, HEALTH_PATH),
        None => format!("{}{}", trimmed, HEALTH_PATH),
    }
}
