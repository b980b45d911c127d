//! トースト通知

use crate::app::AppState;
use food_vision_common::{Action, NotificationKind};
use leptos::prelude::*;

#[component]
pub fn Toast(state: AppState) -> impl IntoView {
    let notification = move || state.with(|s| s.notification().cloned());

    let dismiss = move |_| {
        state.update(|s| {
            s.update(Action::DismissNotification);
        });
    };

    move || {
        notification().map(|n| {
            let kind = match n.kind {
                NotificationKind::Loading => "loading",
                NotificationKind::Success => "success",
                NotificationKind::Error => "error",
            };
            view! {
                <div class=format!("toast toast-{}", kind) role="status" on:click=dismiss>
                    {n.message}
                </div>
            }
        })
    }
}
