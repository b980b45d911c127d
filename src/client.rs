//! 予測APIクライアント
//!
//! 画像1枚をmultipart（フィールド名 `image`）でPOSTし、
//! レスポンスの解釈は `food_vision_common::interpret_response` に任せる。
//! リトライはしない。タイムアウトはNetworkFailureとして返す。

use crate::error::{FoodVisionError, Result};
use crate::scanner::ImageUpload;
use food_vision_common::api::{health_url, is_success, IMAGE_FIELD};
use food_vision_common::{interpret_health, interpret_response, HealthStatus, Prediction, PredictError};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// 画像から予測結果を得るもの
///
/// 実装は1回だけ試行し、失敗はそのまま呼び出し側へ返す
#[allow(async_fn_in_trait)]
pub trait Predictor {
    async fn predict(&self, upload: &ImageUpload) -> std::result::Result<Vec<Prediction>, PredictError>;
}

/// HTTP経由の予測クライアント
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FoodVisionError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// サーバーの稼働確認（GET /api/health）
    pub async fn health(&self) -> std::result::Result<HealthStatus, PredictError> {
        let url = health_url(&self.endpoint);
        debug!(%url, "health check");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.network_failure(e))?;
        let status = response.status().as_u16();
        let body = self.read_body(response, status).await?;

        interpret_health(status, &body)
    }

    async fn read_body(
        &self,
        response: reqwest::Response,
        status: u16,
    ) -> std::result::Result<String, PredictError> {
        match response.text().await {
            Ok(body) => Ok(body),
            // 失敗レスポンスのボディが読めなければ汎用メッセージにする
            Err(_) if !is_success(status) => Ok(String::new()),
            Err(e) => Err(self.network_failure(e)),
        }
    }

    fn network_failure(&self, error: reqwest::Error) -> PredictError {
        if error.is_timeout() {
            PredictError::NetworkFailure(format!("Request timed out after {:?}", self.timeout))
        } else {
            PredictError::NetworkFailure(format!("Could not reach {}: {}", self.endpoint, error))
        }
    }
}

impl Predictor for HttpPredictor {
    async fn predict(&self, upload: &ImageUpload) -> std::result::Result<Vec<Prediction>, PredictError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)
            .map_err(|e| PredictError::NetworkFailure(format!("Invalid upload: {}", e)))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        debug!(endpoint = %self.endpoint, file = %upload.file_name, bytes = upload.bytes.len(), "POST predict");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.network_failure(e))?;
        let status = response.status().as_u16();
        let body = self.read_body(response, status).await?;

        debug!(status, body_len = body.len(), "predict response");

        interpret_response(status, &body)
    }
}
