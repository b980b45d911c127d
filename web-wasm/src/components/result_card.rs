//! 結果カードコンポーネント

use crate::components::progress_bar::ConfidenceBar;
use food_vision_common::ResultCard;
use leptos::prelude::*;

#[component]
pub fn PredictionCard(card: ResultCard) -> impl IntoView {
    let class = if card.is_top { "result-card top" } else { "result-card" };
    let confidence_text = card.confidence_text();
    let percent = card.bar_percent();

    view! {
        <li class=class>
            <div class="result-header">
                <span class="rank">{format!("#{}", card.rank)}</span>
                <span class="label">{card.label}</span>
                {card.is_top.then(|| view! { <span class="badge">"Top match"</span> })}
                <span class=format!("confidence tier-{}", card.tier.as_str())>
                    {confidence_text}
                </span>
            </div>
            <ConfidenceBar percent=percent tier=card.tier />
        </li>
    }
}
