//! メインアプリケーションコンポーネント
//!
//! 状態は `UiState<ObjectUrl>` ひとつだけで、変更は必ず `Action` 経由。
//! プレビューのBlob URLは状態が所有し、Idleに戻るか次のセッションに
//! 置き換わった時点でdropされて解放される。

use crate::api;
use crate::clipboard;
use crate::components::{
    header::Header,
    results_panel::ResultsPanel,
    toast::Toast,
    upload_area::UploadArea,
};
use food_vision_common::api::DEFAULT_TIMEOUT_SECS;
use food_vision_common::{
    summary_text, Action, Notification, PredictError, Screen, Transition, UiState,
};
use gloo::file::{Blob, ObjectUrl};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{AbortController, File};

/// 画面全体の状態
pub type AppState = RwSignal<UiState<ObjectUrl>, LocalStorage>;

/// トーストを自動で消すまでの時間
const TOAST_MILLIS: u32 = 4_000;

const SHARED_MESSAGE: &str = "Results copied to clipboard!";

#[component]
pub fn App() -> impl IntoView {
    let state: AppState = RwSignal::new_local(UiState::default());
    let abort = StoredValue::new_local(None::<AbortController>);
    let endpoint = StoredValue::new(api::endpoint());

    // ファイル受け入れハンドラ
    let on_file = move |file: File| {
        let preview = ObjectUrl::from(Blob::from(web_sys::Blob::from(file.clone())));
        let Some(Transition::Started(session)) =
            state.try_update(|s| s.update(Action::FileAccepted(preview)))
        else {
            return;
        };

        let controller = AbortController::new().ok();
        abort.set_value(controller.clone());

        spawn_local(async move {
            let result = match &controller {
                Some(controller) => {
                    api::predict(&endpoint.get_value(), &file, controller, DEFAULT_TIMEOUT_SECS).await
                }
                None => Err(PredictError::NetworkFailure(
                    "Could not start the request".to_string(),
                )),
            };

            let action = match result {
                Ok(predictions) => Action::PredictionSucceeded { session, predictions },
                Err(error) => {
                    gloo::console::error!(format!(
                        "prediction {} failed ({}): {}",
                        session,
                        error.kind(),
                        error
                    ));
                    Action::PredictionFailed { session, error }
                }
            };

            match state.try_update(|s| s.update(action)) {
                Some(Transition::Completed(_) | Transition::Failed(_)) => {
                    abort.set_value(None);
                    schedule_dismiss(state);
                }
                // リセット済みのセッション
                _ => {}
            }
        });
    };

    // リセットハンドラ（処理中なら通信を中断する）
    let on_reset = move || {
        abort.update_value(|controller| {
            if let Some(controller) = controller.take() {
                controller.abort();
            }
        });
        state.update(|s| {
            s.update(Action::Reset);
        });
    };

    // 共有ハンドラ（結果の要約をクリップボードへ）
    let on_share = move || {
        let Some(text) = state.with_untracked(|s| s.predictions().map(summary_text)) else {
            return;
        };
        spawn_local(async move {
            match clipboard::write_text(&text).await {
                Ok(()) => {
                    state.update(|s| {
                        s.update(Action::Notify(Notification::success(SHARED_MESSAGE)));
                    });
                    schedule_dismiss(state);
                }
                Err(e) => gloo::console::error!("clipboard write failed", e),
            }
        });
    };

    let on_toggle_theme = move || {
        state.update(|s| {
            s.update(Action::ToggleTheme);
        });
    };

    let show_results = move || state.with(|s| Screen::of(s.view()) == Screen::Results);

    view! {
        <div class=move || format!("app theme-{}", state.with(|s| s.theme().as_str()))>
            <Header
                theme=Signal::derive(move || state.with(|s| s.theme()))
                on_toggle_theme=on_toggle_theme
            />

            <main class="container">
                <Show
                    when=show_results
                    fallback=move || view! { <UploadArea state=state on_file=on_file /> }
                >
                    <ResultsPanel state=state on_reset=on_reset on_share=on_share />
                </Show>
            </main>

            <Toast state=state />
        </div>
    }
}

/// 今出ている成功/失敗トーストを一定時間後に消す
///
/// その間に別の通知へ置き換わっていれば何もしない
fn schedule_dismiss(state: AppState) {
    let Some(message) =
        state.with_untracked(|s| s.notification().map(|n| n.message.clone()))
    else {
        return;
    };

    Timeout::new(TOAST_MILLIS, move || {
        let _ = state.try_update(|s| {
            if s.notification().is_some_and(|n| n.message == message) {
                s.update(Action::DismissNotification);
            }
        });
    })
    .forget();
}
