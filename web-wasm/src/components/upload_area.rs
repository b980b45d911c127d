//! アップロードエリアコンポーネント
//!
//! ドロップとファイル選択のどちらも先頭1ファイルだけを見て、
//! 画像でなければ何もしない。

use crate::app::AppState;
use crate::components::progress_bar::ProgressIndicator;
use food_vision_common::session::ANALYZING_MESSAGE;
use food_vision_common::{accept_first, Action};
use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement};

#[component]
pub fn UploadArea<F>(state: AppState, on_file: F) -> impl IntoView
where
    F: Fn(File) + Clone + 'static,
{
    let input_ref: NodeRef<Input> = NodeRef::new();
    let is_processing = move || state.with(|s| s.is_processing());
    let set_hover = move |hover: bool| {
        state.update(|s| {
            s.update(Action::DragHover(hover));
        });
    };

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_hover(false);

            if state.with_untracked(|s| s.is_processing()) {
                return;
            }

            let files = ev.data_transfer().and_then(|dt| dt.files());
            if let Some(file) = files.and_then(first_image) {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !state.with_untracked(|s| s.drag_hover()) {
            set_hover(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_hover(false);
    };

    // ファイル選択ダイアログを開く
    let on_click = move |_| {
        if state.with_untracked(|s| s.is_processing()) {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        if let Some(file) = input.files().and_then(first_image) {
            on_file(file);
        }
        // 同じファイルをもう一度選んでもchangeが発火するように
        input.set_value("");
    };

    let preview = move || state.with(|s| s.preview().map(|url| url.to_string()));

    view! {
        <div class="upload-wrapper">
            <input
                node_ref=input_ref
                type="file"
                accept="image/*"
                class="hidden-input"
                on:change=on_change
            />
            <section
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if state.with(|s| s.drag_hover()) {
                        classes.push("dragover");
                    }
                    if is_processing() {
                        classes.push("processing");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <Show
                    when=is_processing
                    fallback=|| view! {
                        <div class="upload-icon">"📷"</div>
                        <p>"Drag & drop a food photo, or click to choose one"</p>
                        <p class="text-muted">"Supported formats: JPEG, PNG, GIF, WebP"</p>
                    }
                >
                    <img class="preview" src=preview alt="Uploaded food" />
                    <ProgressIndicator message=ANALYZING_MESSAGE />
                </Show>
            </section>
        </div>
    }
}

/// 先頭のファイルが画像ならそれを返す
fn first_image(list: FileList) -> Option<File> {
    let files = (0..list.length()).filter_map(|i| list.get(i));
    accept_first(files, |file: &File| file.type_())
}
