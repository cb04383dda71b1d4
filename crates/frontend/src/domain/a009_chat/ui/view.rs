use super::link_preview::LinkPreviewCard;
use super::view_model::{waiting_count, ChatSupportVm};
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_opt_datetime, format_time};
use crate::shared::event_bus::{subscribe_scoped, use_chat_bus, ChatEvent};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_WORKSPACE;
use crate::shared::request_guard::use_request_guard;
use crate::system::auth::context::use_auth;
use contracts::domain::a009_chat::aggregate::{ChatMessage, ChatSender, ChatSession};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ChatSupport() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let agent = auth_state.with_untracked(|a| a.display_name());
    let vm = ChatSupportVm::new(agent, use_chat_bus(), use_request_guard(), use_request_guard());

    subscribe_scoped(move |event| match event {
        ChatEvent::SessionUpdated(session) => vm.apply_session_update(session.clone()),
        ChatEvent::MessageReceived(message) => {
            log::debug!("chat: new message in session {}", message.session_id)
        }
        _ => {}
    });

    Effect::new(move |_| {
        untrack(move || {
            vm.load();
            vm.start_polling();
        })
    });

    let error = Signal::derive(move || vm.error.get());
    let thread = Memo::new(move |_| vm.thread());
    let active = Memo::new(move |_| vm.active());
    let can_send = Signal::derive(move || {
        !vm.compose.with(|c| c.trim().is_empty())
            && active.with(|a| a.as_ref().is_some_and(ChatSession::is_open))
    });

    view! {
        <PageFrame page_id="a009_chat--workspace" category=PAGE_CAT_WORKSPACE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Chat support"</h1>
                    <UiBadge variant="warning".to_string()>
                        {move || format!("{} waiting", vm.sessions.with(|s| waiting_count(s)))}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.load()
                        disabled=Signal::derive(move || vm.loading.get())
                    >
                        {move || if vm.loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                </div>
            </div>

            <ErrorPanel error=error on_retry=Callback::new(move |_| vm.load()) />

            <div class="chat">
                <aside class="chat__sessions">
                    <Show
                        when=move || !vm.sessions.with(|s| s.is_empty())
                        fallback=|| view! { <div class="chat__empty">"No chat sessions."</div> }
                    >
                        <For
                            each=move || vm.sessions.get()
                            key=|s| (s.id.clone(), s.status, s.unread_count, s.assigned_agent.clone())
                            children=move |session| view! { <SessionItem session=session vm=vm /> }
                        />
                    </Show>
                </aside>

                <section class="chat__thread">
                    {move || match active.get() {
                        None => view! {
                            <div class="chat__placeholder">"Select a session to read the conversation."</div>
                        }
                        .into_any(),
                        Some(session) => {
                            let id = session.id.clone();
                            let is_open = session.is_open();
                            view! {
                                <div class="chat__thread-header">
                                    <div>
                                        <div class="chat__customer">{session.customer_name.clone()}</div>
                                        <div class="chat__customer-email">{session.customer_email.clone().unwrap_or_default()}</div>
                                    </div>
                                    <UiBadge variant=session.status.badge_variant().to_string()>{session.status.label()}</UiBadge>
                                    {is_open.then(|| view! {
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            size=ButtonSize::Small
                                            disabled=Signal::derive(move || vm.busy.get())
                                            on_click=move |_| vm.close(id.clone())
                                        >
                                            "Close session"
                                        </Button>
                                    })}
                                </div>
                            }
                            .into_any()
                        }
                    }}

                    <div class="chat__messages">
                        <For
                            each=move || thread.get()
                            key=|m| m.id.clone()
                            children=move |message| view! { <MessageBubble message=message vm=vm /> }
                        />
                    </div>

                    <Show when=move || active.with(|a| a.is_some())>
                        <div class="chat__compose">
                            <Textarea value=vm.compose placeholder="Type a reply..." attr:rows=3 />
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=Signal::derive(move || !can_send.get())
                                on_click=move |_| vm.send()
                            >
                                {icon("send")}
                                " Send"
                            </Button>
                        </div>
                    </Show>
                </section>
            </div>
        </PageFrame>
    }
}

#[component]
fn SessionItem(session: ChatSession, vm: ChatSupportVm) -> impl IntoView {
    let id = session.id.clone();
    let claim_id = session.id.clone();
    let is_active = move || vm.active_session.with(|a| a.as_deref() == Some(id.as_str()));
    let open_id = session.id.clone();

    view! {
        <div
            class="chat-session"
            class:chat-session--active=is_active
            on:click=move |_| vm.open_session(open_id.clone())
        >
            <div class="chat-session__header">
                <span class="chat-session__name">{session.customer_name.clone()}</span>
                <UiBadge variant=session.status.badge_variant().to_string()>{session.status.label()}</UiBadge>
            </div>
            <div class="chat-session__meta">
                <span>{format_opt_datetime(session.last_message_at)}</span>
                {(session.unread_count > 0).then(|| view! {
                    <span class="chat-session__unread">{session.unread_count}</span>
                })}
                {session.assigned_agent.clone().map(|a| view! { <span class="chat-session__agent">{a}</span> })}
            </div>
            {session.can_claim().then(|| view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    disabled=Signal::derive(move || vm.busy.get())
                    on_click=move |ev: leptos::ev::MouseEvent| {
                        ev.stop_propagation();
                        vm.claim(claim_id.clone());
                    }
                >
                    "Claim"
                </Button>
            })}
        </div>
    }
}

#[component]
fn MessageBubble(message: ChatMessage, vm: ChatSupportVm) -> impl IntoView {
    let class = match message.sender {
        ChatSender::Customer => "chat-message chat-message--customer",
        ChatSender::Agent => "chat-message chat-message--agent",
        ChatSender::System => "chat-message chat-message--system",
    };
    let pending = vm.drafts.with_untracked(|d| d.iter().any(|m| m.id == message.id));
    let urls = message.urls();

    view! {
        <div class=class class:chat-message--pending=pending>
            <div class="chat-message__meta">
                {message.sender_name.clone().unwrap_or_default()}
                " · "
                {format_time(message.sent_at)}
            </div>
            <div class="chat-message__content">{message.content.clone()}</div>
            {urls.into_iter().map(|url| view! { <LinkPreviewCard url=url vm=vm /> }).collect_view()}
        </div>
    }
}
