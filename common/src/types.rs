//! 予測APIの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - RawPrediction: サーバーが返す1件分の生データ
//! - PredictResponse: /api/predict のレスポンス本体
//! - Prediction: 表示用に正規化した1件

use serde::{Deserialize, Serialize};

/// サーバー側の生レコード `{ "class": "apple_pie", "confidence": 0.87 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub class: String,
    /// 0.0〜1.0 の割合
    pub confidence: f64,
}

/// /api/predict の成功レスポンス
///
/// `success` か `predictions` が欠けていればInvalidResponseとして扱う
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub predictions: Option<Vec<RawPrediction>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 失敗時のボディ
///
/// 互換のため `message` と `error` のどちらも受け付ける
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 表示用の予測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// 人が読めるラベル（"Apple Pie"）
    pub label: String,
    /// 0〜100 のパーセント、小数第2位まで
    pub confidence: f64,
}

/// /api/health のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}
