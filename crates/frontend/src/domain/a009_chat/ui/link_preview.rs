use super::view_model::{ChatSupportVm, PreviewState};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Card under a message for one link it contains. Falls back to the bare
/// link when no preview can be fetched.
#[component]
pub fn LinkPreviewCard(url: String, vm: ChatSupportVm) -> impl IntoView {
    vm.request_preview(url.clone());
    let key = url.clone();
    let state = move || vm.previews.with(|p| p.get(&key).cloned());

    move || match state() {
        Some(PreviewState::Ready(preview)) => view! {
            <a class="link-preview" href=preview.url.clone() target="_blank" rel="noopener noreferrer">
                {preview.image_url.clone().map(|src| view! { <img class="link-preview__image" src=src alt="" /> })}
                <div class="link-preview__body">
                    <div class="link-preview__title">{preview.display_title().to_string()}</div>
                    {preview.description.clone().map(|d| view! { <div class="link-preview__description">{d}</div> })}
                    <div class="link-preview__url">{preview.url.clone()}</div>
                </div>
            </a>
        }
        .into_any(),
        Some(PreviewState::Loading) => view! {
            <div class="link-preview link-preview--loading">{icon("link")} " Loading preview..."</div>
        }
        .into_any(),
        Some(PreviewState::Failed) | None => view! {
            <a class="link-preview link-preview--plain" href=url.clone() target="_blank" rel="noopener noreferrer">
                {icon("link")} " " {url.clone()}
            </a>
        }
        .into_any(),
    }
}
