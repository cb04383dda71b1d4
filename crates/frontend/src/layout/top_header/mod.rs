//! TopHeader: sidebar toggle, application title, waiting chats, user and logout.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::event_bus::{subscribe_scoped, ChatEvent};
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    // Updated by the chat page whenever it refreshes its session list.
    let waiting_chats = RwSignal::new(0usize);
    subscribe_scoped(move |event| {
        if let ChatEvent::SessionsRefreshed { waiting } = event {
            waiting_chats.set(*waiting);
        }
    });

    let open_chat = move |_| ctx.open_tab("a009_chat", tab_label_for_key("a009_chat"));
    let logout = move |_| do_logout(set_auth_state);
    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"Service Desk"</span>
            </div>

            <div class="top-header__actions">
                <button class="top-header__icon-btn" on:click=open_chat title="Waiting chats">
                    {icon("chat")}
                    <Show when=move || { waiting_chats.get() > 0 }>
                        <span class="top-header__counter">{move || waiting_chats.get()}</span>
                    </Show>
                </button>

                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || auth_state.get().display_name()}</span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Log out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
