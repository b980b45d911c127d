//! エラー型定義

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 予測API呼び出しのエラー
///
/// どの種別もセッションをIdleへ戻し、一度だけ通知される。
/// Displayはユーザー向けメッセージそのもの（"Analysis failed: {}" に埋め込む）。
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message")]
pub enum PredictError {
    /// リクエストが完了しなかった（接続失敗・タイムアウト・中断）
    #[error("{0}")]
    NetworkFailure(String),

    /// サーバーが非2xxを返した
    #[error("{0}")]
    PredictionFailed(String),

    /// 2xxだがペイロードが期待した形でない
    #[error("{0}")]
    InvalidResponse(String),
}

impl PredictError {
    /// ユーザー向けメッセージ
    pub fn message(&self) -> &str {
        match self {
            PredictError::NetworkFailure(m)
            | PredictError::PredictionFailed(m)
            | PredictError::InvalidResponse(m) => m,
        }
    }

    /// ログ用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::NetworkFailure(_) => "network_failure",
            PredictError::PredictionFailed(_) => "prediction_failed",
            PredictError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, PredictError>;
