//! 予測APIクライアントのテスト
//!
//! 127.0.0.1 上に使い捨てのaxumサーバーを立てて検証する

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use food_vision::client::{HttpPredictor, Predictor};
use food_vision::scanner::ImageUpload;
use food_vision_common::api::GENERIC_FAILURE_MESSAGE;
use food_vision_common::PredictError;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    format!("http://{}/api/predict", addr)
}

fn upload() -> ImageUpload {
    ImageUpload {
        path: PathBuf::from("pizza.png"),
        file_name: "pizza.png".into(),
        mime: "image/png".into(),
        bytes: b"\x89PNG\r\n\x1a\nfake".to_vec(),
    }
}

fn top5() -> Value {
    json!({
        "success": true,
        "predictions": [
            {"class": "pizza", "confidence": 0.9423},
            {"class": "garlic_bread", "confidence": 0.0312},
            {"class": "lasagna", "confidence": 0.0101},
            {"class": "bruschetta", "confidence": 0.0089},
            {"class": "caprese_salad", "confidence": 0.0023}
        ],
        "message": "Food classification completed successfully"
    })
}

/// フィールド名・ファイル名・Content-Typeを確認してから上位5件を返す
async fn strict_predict(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default();

        if file_name.as_deref() == Some("pizza.png")
            && content_type.as_deref() == Some("image/png")
            && bytes.starts_with(b"\x89PNG")
        {
            return (StatusCode::OK, Json(top5()));
        }
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "unexpected upload"})));
    }
    (StatusCode::BAD_REQUEST, Json(json!({"error": "No image file provided"})))
}

#[tokio::test]
async fn test_predict_success_top5_in_order() {
    let endpoint = spawn(Router::new().route("/api/predict", post(strict_predict))).await;
    let predictor = HttpPredictor::new(endpoint, TIMEOUT).unwrap();

    let predictions = predictor.predict(&upload()).await.expect("prediction failed");
    assert_eq!(predictions.len(), 5);
    assert_eq!(predictions[0].label, "Pizza");
    assert_eq!(predictions[0].confidence, 94.23);
    assert_eq!(predictions[1].label, "Garlic Bread");
    assert_eq!(predictions[1].confidence, 3.12);
    assert_eq!(predictions[4].label, "Caprese Salad");
    assert_eq!(predictions[4].confidence, 0.23);
}

#[tokio::test]
async fn test_predict_failure_message() {
    let app = Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({"message": "bad image"}))) }),
    );
    let predictor = HttpPredictor::new(spawn(app).await, TIMEOUT).unwrap();

    let err = predictor.predict(&upload()).await.unwrap_err();
    assert_eq!(err, PredictError::PredictionFailed("bad image".into()));
}

#[tokio::test]
async fn test_predict_failure_without_body() {
    let app = Router::new().route(
        "/api/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "oops") }),
    );
    let predictor = HttpPredictor::new(spawn(app).await, TIMEOUT).unwrap();

    let err = predictor.predict(&upload()).await.unwrap_err();
    assert!(matches!(err, PredictError::PredictionFailed(_)));
    assert_eq!(err.message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_predict_success_false_is_invalid() {
    let app = Router::new().route(
        "/api/predict",
        post(|| async { Json(json!({"success": false, "message": "nope"})) }),
    );
    let predictor = HttpPredictor::new(spawn(app).await, TIMEOUT).unwrap();

    let err = predictor.predict(&upload()).await.unwrap_err();
    assert!(matches!(err, PredictError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_predict_timeout_is_network_failure() {
    let app = Router::new().route(
        "/api/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(top5())
        }),
    );
    let predictor = HttpPredictor::new(spawn(app).await, Duration::from_millis(200)).unwrap();

    let err = predictor.predict(&upload()).await.unwrap_err();
    assert!(matches!(err, PredictError::NetworkFailure(_)), "got {:?}", err);
    assert!(err.message().contains("timed out"));
}

#[tokio::test]
async fn test_predict_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let predictor = HttpPredictor::new(format!("http://{}/api/predict", addr), TIMEOUT).unwrap();
    let err = predictor.predict(&upload()).await.unwrap_err();
    assert!(matches!(err, PredictError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_health() {
    let app = Router::new().route(
        "/api/health",
        get(|| async { Json(json!({"status": "healthy", "message": "Food Vision AI API is running"})) }),
    );
    let predictor = HttpPredictor::new(spawn(app).await, TIMEOUT).unwrap();

    let health = predictor.health().await.expect("health failed");
    assert!(health.is_healthy());
}
