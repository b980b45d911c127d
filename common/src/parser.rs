//! APIレスポンスパーサー
//!
//! /api/predict のステータスとボディから予測結果リスト、
//! またはPredictErrorを組み立てる

use crate::api::{is_success, GENERIC_FAILURE_MESSAGE, INVALID_RESPONSE_MESSAGE};
use crate::error::{PredictError, Result};
use crate::types::{ErrorBody, HealthStatus, Prediction, PredictResponse, RawPrediction};

/// クラス名を表示用ラベルに変換
///
/// アンダースコアを空白に置き換え、各単語の先頭を大文字にする。
/// 英数字以外（空白・`-`・`'` など）の直後を単語の先頭とみなす。
///
/// # Examples
/// ```
/// use food_vision_common::format_label;
///
/// assert_eq!(format_label("apple_pie"), "Apple Pie");
/// ```
pub fn format_label(class: &str) -> String {
    let mut label = String::with_capacity(class.len());
    let mut word_start = true;

    for c in class.chars() {
        let c = if c == '_' { ' ' } else { c };
        if !c.is_alphanumeric() {
            word_start = true;
            label.push(c);
        } else if word_start {
            label.extend(c.to_uppercase());
            word_start = false;
        } else {
            label.push(c);
        }
    }

    label
}

/// 0.0〜1.0 の割合を小数第2位までのパーセントに変換
///
/// 範囲外の値は 0〜100 に丸める
pub fn to_percentage(fraction: f64) -> f64 {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    ((fraction * 100.0) * 100.0).round() / 100.0
}

impl TryFrom<RawPrediction> for Prediction {
    type Error = PredictError;

    fn try_from(raw: RawPrediction) -> Result<Self> {
        let label = format_label(raw.class.trim());
        if label.is_empty() {
            return Err(PredictError::InvalidResponse(INVALID_RESPONSE_MESSAGE.into()));
        }

        Ok(Prediction {
            label,
            confidence: to_percentage(raw.confidence),
        })
    }
}

/// 失敗レスポンスのボディからメッセージを取り出す
///
/// 優先順位:
/// 1. `message`
/// 2. `error`
/// 3. 汎用メッセージ
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

/// 成功レスポンスのボディをパース
///
/// サーバーの並び順を保持し、クライアント側で並べ替えない
pub fn parse_predictions(body: &str) -> Result<Vec<Prediction>> {
    let invalid = || PredictError::InvalidResponse(INVALID_RESPONSE_MESSAGE.into());

    let response: PredictResponse = serde_json::from_str(body).map_err(|_| invalid())?;

    let predictions = match (response.success, response.predictions) {
        (Some(true), Some(predictions)) if !predictions.is_empty() => predictions,
        _ => return Err(invalid()),
    };

    predictions.into_iter().map(Prediction::try_from).collect()
}

/// ステータスコードとボディから結果を決定
///
/// # Returns
/// * `Ok(Vec<Prediction>)` - 2xx かつ `success: true` と予測配列あり
/// * `Err(PredictionFailed)` - 非2xx
/// * `Err(InvalidResponse)` - 2xx だが形が不正
pub fn interpret_response(status: u16, body: &str) -> Result<Vec<Prediction>> {
    if !is_success(status) {
        return Err(PredictError::PredictionFailed(failure_message(body)));
    }
    parse_predictions(body)
}

/// /api/health の結果を決定
pub fn interpret_health(status: u16, body: &str) -> Result<HealthStatus> {
    if !is_success(status) {
        return Err(PredictError::PredictionFailed(failure_message(body)));
    }
    serde_json::from_str(body)
        .map_err(|_| PredictError::InvalidResponse(INVALID_RESPONSE_MESSAGE.into()))
}
