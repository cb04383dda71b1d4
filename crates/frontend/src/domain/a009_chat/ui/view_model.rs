use crate::domain::a009_chat::api;
use crate::shared::event_bus::{ChatEvent, ChatEventBus};
use crate::shared::request_guard::RequestGuard;
use contracts::domain::a009_chat::aggregate::{
    merge_thread, order_sessions, ChatMessage, ChatSender, ChatSession, ChatSessionStatus,
    LinkPreview, SendMessageRequest,
};
use contracts::shared::ApiResult;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

pub const POLL_INTERVAL_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    Loading,
    Ready(LinkPreview),
    Failed,
}

/// Customer messages in `fresh` whose ids are not in `known`.
pub fn new_incoming(known: &[ChatMessage], fresh: &[ChatMessage]) -> Vec<ChatMessage> {
    fresh
        .iter()
        .filter(|m| m.sender == ChatSender::Customer)
        .filter(|m| !known.iter().any(|k| k.id == m.id))
        .cloned()
        .collect()
}

pub fn waiting_count(sessions: &[ChatSession]) -> usize {
    sessions
        .iter()
        .filter(|s| s.status == ChatSessionStatus::Waiting)
        .count()
}

/// Replace the session with the same id, keeping list order rules.
pub fn upsert_session(sessions: &mut Vec<ChatSession>, updated: ChatSession) {
    match sessions.iter_mut().find(|s| s.id == updated.id) {
        Some(slot) => *slot = updated,
        None => sessions.push(updated),
    }
    order_sessions(sessions);
}

#[derive(Clone, Copy)]
pub struct ChatSupportVm {
    pub sessions: RwSignal<Vec<ChatSession>>,
    pub active_session: RwSignal<Option<String>>,
    /// Thread as last returned by the chat service.
    pub server_thread: RwSignal<Vec<ChatMessage>>,
    thread_loaded: RwSignal<bool>,
    /// Agent messages not yet confirmed by the chat service.
    pub drafts: RwSignal<Vec<ChatMessage>>,
    pub compose: RwSignal<String>,
    pub previews: RwSignal<HashMap<String, PreviewState>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub busy: RwSignal<bool>,
    agent_name: StoredValue<String>,
    bus: StoredValue<ChatEventBus, LocalStorage>,
    sessions_guard: StoredValue<RequestGuard>,
    thread_guard: StoredValue<RequestGuard>,
}

impl ChatSupportVm {
    pub fn new(
        agent_name: String,
        bus: ChatEventBus,
        sessions_guard: StoredValue<RequestGuard>,
        thread_guard: StoredValue<RequestGuard>,
    ) -> Self {
        Self {
            sessions: RwSignal::new(Vec::new()),
            active_session: RwSignal::new(None),
            server_thread: RwSignal::new(Vec::new()),
            thread_loaded: RwSignal::new(false),
            drafts: RwSignal::new(Vec::new()),
            compose: RwSignal::new(String::new()),
            previews: RwSignal::new(HashMap::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            busy: RwSignal::new(false),
            agent_name: StoredValue::new(agent_name),
            bus: StoredValue::new_local(bus),
            sessions_guard,
            thread_guard,
        }
    }

    /// Thread of the active session with pending drafts merged in.
    pub fn thread(&self) -> Vec<ChatMessage> {
        let Some(active) = self.active_session.get() else {
            return Vec::new();
        };
        let server = self.server_thread.get();
        self.drafts.with(|drafts| {
            let mine: Vec<ChatMessage> = drafts
                .iter()
                .filter(|d| d.session_id == active)
                .cloned()
                .collect();
            merge_thread(server, &mine)
        })
    }

    pub fn active(&self) -> Option<ChatSession> {
        let id = self.active_session.get()?;
        self.sessions.with(|s| s.iter().find(|session| session.id == id).cloned())
    }

    fn emit(&self, event: ChatEvent) {
        self.bus.with_value(|bus| bus.emit(event));
    }

    pub fn refresh_sessions(&self) {
        let vm = *self;
        let ticket = vm.sessions_guard.get_value().begin();
        spawn_local(async move {
            let result = api::fetch_sessions().await;
            ticket.commit(move || vm.apply_sessions(result));
        });
    }

    /// A successful poll clears an error left by an earlier failed one.
    fn apply_sessions(&self, result: ApiResult<Vec<ChatSession>>) {
        match result {
            Ok(mut sessions) => {
                order_sessions(&mut sessions);
                let waiting = waiting_count(&sessions);
                self.sessions.set(sessions);
                self.error.set(None);
                self.emit(ChatEvent::SessionsRefreshed { waiting });
            }
            Err(e) => self.error.set(Some(e.to_string())),
        }
        self.loading.set(false);
    }

    pub fn refresh_thread(&self) {
        let vm = *self;
        let Some(session_id) = vm.active_session.get_untracked() else {
            return;
        };
        let ticket = vm.thread_guard.get_value().begin();
        spawn_local(async move {
            let result = api::fetch_messages(&session_id).await;
            ticket.commit(move || match result {
                Ok(fresh) => {
                    // First load of a thread is history, not news.
                    let incoming = if vm.thread_loaded.get_untracked() {
                        vm.server_thread.with_untracked(|known| new_incoming(known, &fresh))
                    } else {
                        Vec::new()
                    };
                    vm.server_thread.set(fresh);
                    vm.thread_loaded.set(true);
                    for message in incoming {
                        vm.emit(ChatEvent::MessageReceived(message));
                    }
                }
                Err(e) => log::warn!("chat thread {} refresh failed: {}", session_id, e),
            });
        });
    }

    pub fn load(&self) {
        self.loading.set(true);
        self.error.set(None);
        self.refresh_sessions();
        self.refresh_thread();
    }

    /// Poll sessions and the open thread until the page is disposed.
    pub fn start_polling(&self) {
        let vm = *self;
        let guard = vm.sessions_guard.get_value();
        spawn_local(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(POLL_INTERVAL_MS).await;
                if guard.is_disposed() {
                    log::debug!("chat polling stopped");
                    break;
                }
                vm.refresh_sessions();
                vm.refresh_thread();
            }
        });
    }

    pub fn open_session(&self, session_id: String) {
        if self.active_session.get_untracked().as_deref() == Some(session_id.as_str()) {
            return;
        }
        self.thread_guard.get_value().invalidate();
        self.server_thread.set(Vec::new());
        self.thread_loaded.set(false);
        self.compose.set(String::new());
        self.error.set(None);
        self.active_session.set(Some(session_id));
        self.refresh_thread();
    }

    pub fn send(&self) {
        let vm = *self;
        let Some(session_id) = vm.active_session.get_untracked() else {
            return;
        };
        let request = SendMessageRequest {
            session_id: session_id.clone(),
            content: vm.compose.get_untracked().trim().to_string(),
        };
        if let Err(msg) = request.validate() {
            vm.error.set(Some(msg));
            return;
        }

        let draft = vm.agent_name.with_value(|agent| {
            ChatMessage::agent_draft(&session_id, agent, &request.content, chrono::Utc::now())
        });
        let draft_id = draft.id.clone();
        vm.drafts.update(|d| d.push(draft));
        vm.compose.set(String::new());
        vm.error.set(None);

        let guard = vm.thread_guard.get_value();
        spawn_local(async move {
            let result = api::send_message(&request).await;
            if guard.is_disposed() {
                return;
            }
            vm.drafts.update(|d| d.retain(|m| m.id != draft_id));
            match result {
                Ok(message) => {
                    if vm.active_session.get_untracked().as_deref() == Some(session_id.as_str()) {
                        vm.server_thread.update(|t| {
                            if !t.iter().any(|m| m.id == message.id) {
                                t.push(message);
                            }
                        });
                    }
                    vm.emit(ChatEvent::MessageSent { session_id });
                }
                Err(e) => {
                    log::warn!("chat message not sent: {}", e);
                    if vm.compose.get_untracked().is_empty() {
                        vm.compose.set(request.content);
                    }
                    vm.error.set(Some(format!("Message not sent: {}", e)));
                }
            }
        });
    }

    pub fn claim(&self, session_id: String) {
        self.session_action(session_id, true);
    }

    pub fn close(&self, session_id: String) {
        self.session_action(session_id, false);
    }

    fn session_action(&self, session_id: String, claim: bool) {
        let vm = *self;
        let guard = vm.sessions_guard.get_value();
        vm.busy.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = if claim {
                api::claim_session(&session_id).await
            } else {
                api::close_session(&session_id).await
            };
            if guard.is_disposed() {
                return;
            }
            vm.busy.set(false);
            match result {
                Ok(session) => {
                    log::info!("chat session {} is now {}", session.id, session.status.label());
                    // The page's bus listener applies the change to the list.
                    vm.emit(ChatEvent::SessionUpdated(session));
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }

    pub fn apply_session_update(&self, session: ChatSession) {
        self.sessions.update(|s| upsert_session(s, session));
    }

    /// Request a preview for `url` once; later calls reuse the cached state.
    pub fn request_preview(&self, url: String) {
        let vm = *self;
        let known = vm.previews.with_untracked(|p| p.contains_key(&url));
        if known {
            return;
        }
        vm.previews.update(|p| {
            p.insert(url.clone(), PreviewState::Loading);
        });
        let guard = vm.thread_guard.get_value();
        spawn_local(async move {
            let result = api::fetch_link_preview(&url).await;
            if guard.is_disposed() {
                return;
            }
            let state = match result {
                Ok(preview) => PreviewState::Ready(preview),
                Err(e) => {
                    log::debug!("no preview for {}: {}", url, e);
                    PreviewState::Failed
                }
            };
            vm.previews.update(|p| {
                p.insert(url, state);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::shared::ApiError;

    fn message(id: &str, sender: ChatSender) -> ChatMessage {
        ChatMessage {
            id: id.into(),
            session_id: "s1".into(),
            sender,
            sender_name: None,
            content: format!("message {id}"),
            sent_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    fn session(id: &str, status: ChatSessionStatus) -> ChatSession {
        ChatSession {
            id: id.into(),
            customer_name: id.to_uppercase(),
            customer_email: None,
            status,
            assigned_agent: None,
            last_message_at: None,
            unread_count: 0,
        }
    }

    #[test]
    fn test_new_incoming_only_unseen_customer_messages() {
        let known = vec![message("1", ChatSender::Customer)];
        let fresh = vec![
            message("1", ChatSender::Customer),
            message("2", ChatSender::Agent),
            message("3", ChatSender::Customer),
        ];
        let ids: Vec<String> = new_incoming(&known, &fresh).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_successful_poll_clears_previous_error() {
        let owner = Owner::new();
        owner.with(|| {
            let vm = ChatSupportVm::new(
                "Agent".into(),
                ChatEventBus::new(),
                StoredValue::new(RequestGuard::new()),
                StoredValue::new(RequestGuard::new()),
            );

            vm.apply_sessions(Err(ApiError::Network("offline".into())));
            assert!(vm.error.get_untracked().is_some());

            vm.apply_sessions(Ok(vec![session("a", ChatSessionStatus::Waiting)]));
            assert_eq!(vm.error.get_untracked(), None);
            assert_eq!(vm.sessions.get_untracked().len(), 1);
        });
    }

    #[test]
    fn test_upsert_session_reorders() {
        let mut sessions = vec![
            session("a", ChatSessionStatus::Waiting),
            session("b", ChatSessionStatus::Active),
        ];
        assert_eq!(waiting_count(&sessions), 1);

        upsert_session(&mut sessions, session("a", ChatSessionStatus::Active));
        assert_eq!(waiting_count(&sessions), 0);
        assert_eq!(sessions.len(), 2);

        upsert_session(&mut sessions, session("c", ChatSessionStatus::Waiting));
        assert_eq!(sessions[0].id, "c");
    }
}
