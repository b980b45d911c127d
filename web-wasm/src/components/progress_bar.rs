//! プログレスバーコンポーネント

use food_vision_common::ConfidenceTier;
use leptos::prelude::*;

/// 解析中のインジケーター（進捗は分からないので不定表示）
#[component]
pub fn ProgressIndicator(message: &'static str) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="spinner" />
            <div class="progress-bar indeterminate">
                <div class="progress-fill" />
            </div>
            <p class="progress-text">{message}</p>
        </div>
    }
}

/// 信頼度バー
#[component]
pub fn ConfidenceBar(percent: f64, tier: ConfidenceTier) -> impl IntoView {
    view! {
        <div class="confidence-bar">
            <div
                class=format!("confidence-fill tier-{}", tier.as_str())
                style=format!("width: {:.2}%", percent)
            />
        </div>
    }
}
