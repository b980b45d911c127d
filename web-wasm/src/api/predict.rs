//! 画像1枚の予測リクエスト（fetch + FormData）
//!
//! 中断はAbortControllerで行う。タイムアウトも同じコントローラを
//! タイマーからabortするので、どちらもNetworkFailureになる。

use food_vision_common::api::IMAGE_FIELD;
use food_vision_common::{interpret_response, Prediction, PredictError};
use gloo::timers::callback::Timeout;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, File, FormData, Request, RequestInit, RequestMode, Response};

/// 予測を1回だけ試行する
///
/// # Arguments
/// * `endpoint` - POST先のURL
/// * `file` - 受け入れ済みの画像ファイル
/// * `abort` - リセット時に中断するためのコントローラ
/// * `timeout_secs` - この秒数で中断する
pub async fn predict(
    endpoint: &str,
    file: &File,
    abort: &AbortController,
    timeout_secs: u64,
) -> Result<Vec<Prediction>, PredictError> {
    let form = FormData::new().map_err(network_failure)?;
    form.append_with_blob_and_filename(IMAGE_FIELD, file, &file.name())
        .map_err(network_failure)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);
    opts.set_signal(Some(&abort.signal()));

    let request = Request::new_with_str_and_init(endpoint, &opts).map_err(network_failure)?;
    let window = web_sys::window()
        .ok_or_else(|| PredictError::NetworkFailure("No window available".to_string()))?;

    let timed_out = Rc::new(Cell::new(false));
    let timer = {
        let abort = abort.clone();
        let timed_out = timed_out.clone();
        let millis = u32::try_from(timeout_secs.saturating_mul(1000)).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            timed_out.set(true);
            abort.abort();
        })
    };

    let result = send(&window, &request).await;
    drop(timer);

    let (status, body) = result.map_err(|e| {
        if timed_out.get() {
            PredictError::NetworkFailure(format!("Request timed out after {}s", timeout_secs))
        } else {
            network_failure(e)
        }
    })?;

    interpret_response(status, &body)
}

async fn send(window: &web_sys::Window, request: &Request) -> Result<(u16, String), JsValue> {
    let resp_value = JsFuture::from(window.fetch_with_request(request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    let status = resp.status();

    let body = match resp.text() {
        Ok(promise) => JsFuture::from(promise).await,
        Err(e) => Err(e),
    };
    let body = match body {
        Ok(text) => text.as_string().unwrap_or_default(),
        // 失敗レスポンスのボディが読めなければ汎用メッセージにする
        Err(_) if !resp.ok() => String::new(),
        Err(e) => return Err(e),
    };

    Ok((status, body))
}

/// JsValueのエラーをユーザー向けメッセージにする
fn network_failure(error: JsValue) -> PredictError {
    let detail = error
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| error.as_string())
        .unwrap_or_else(|| "Network request failed".to_string());
    PredictError::NetworkFailure(detail)
}
