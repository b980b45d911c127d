//! 結果画面（解析した画像と上位の予測）

use crate::app::AppState;
use crate::components::result_card::PredictionCard;
use food_vision_common::result_cards;
use leptos::prelude::*;

#[component]
pub fn ResultsPanel<R, S>(state: AppState, on_reset: R, on_share: S) -> impl IntoView
where
    R: Fn() + 'static,
    S: Fn() + 'static,
{
    let preview = move || state.with(|s| s.preview().map(|url| url.to_string()));
    let cards = move || state.with(|s| result_cards(s.predictions().unwrap_or_default()));

    view! {
        <section class="results">
            <div class="analyzed-image">
                <h2>"Analyzed Image"</h2>
                <img src=preview alt="Analyzed food" />
            </div>

            <div class="predictions">
                <h2>"Top Predictions"</h2>
                <ol class="result-list">
                    <For
                        each=cards
                        key=|card| card.rank
                        children=move |card| view! { <PredictionCard card=card /> }
                    />
                </ol>

                <div class="actions">
                    <button class="btn btn-secondary" on:click=move |_| on_share()>
                        "📋 Share Results"
                    </button>
                    <button class="btn btn-primary" on:click=move |_| on_reset()>
                        "🔄 Analyze Another Image"
                    </button>
                </div>
            </div>
        </section>
    }
}
