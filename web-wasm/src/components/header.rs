//! ヘッダーコンポーネント

use food_vision_common::Theme;
use leptos::prelude::*;

#[component]
pub fn Header<F>(theme: Signal<Theme>, on_toggle_theme: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    let label = move || {
        if theme.get().is_dark() {
            "☀️ Light"
        } else {
            "🌙 Dark"
        }
    };

    view! {
        <header class="header">
            <h1>"Food Vision AI"</h1>
            <p class="subtitle">"Upload a food photo and get the top-5 dish predictions"</p>
            <button
                class="theme-toggle"
                title="Toggle theme"
                on:click=move |_| on_toggle_theme()
            >
                {label}
            </button>
        </header>
    }
}
