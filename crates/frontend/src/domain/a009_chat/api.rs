use contracts::domain::a009_chat::aggregate::{
    ChatMessage, ChatSession, LinkPreview, SendMessageRequest,
};
use contracts::shared::config::Service;
use contracts::shared::ApiResult;
use serde::Serialize;

use crate::shared::api_utils::{get_json, post_json, service_url, service_url_with_query};

#[derive(Debug, Clone, Serialize)]
struct PreviewQuery<'a> {
    url: &'a str,
}

/// Session action without a payload of its own.
#[derive(Debug, Clone, Serialize)]
struct EmptyBody {}

pub async fn fetch_sessions() -> ApiResult<Vec<ChatSession>> {
    get_json(&service_url(Service::Chat, "sessions")).await
}

pub async fn fetch_messages(session_id: &str) -> ApiResult<Vec<ChatMessage>> {
    let path = format!("sessions/{}/messages", urlencoding::encode(session_id));
    get_json(&service_url(Service::Chat, &path)).await
}

pub async fn send_message(request: &SendMessageRequest) -> ApiResult<ChatMessage> {
    let path = format!("sessions/{}/messages", urlencoding::encode(&request.session_id));
    post_json(&service_url(Service::Chat, &path), request).await
}

/// The chat service decides whether the claim succeeds.
pub async fn claim_session(session_id: &str) -> ApiResult<ChatSession> {
    let path = format!("sessions/{}/claim", urlencoding::encode(session_id));
    post_json(&service_url(Service::Chat, &path), &EmptyBody {}).await
}

pub async fn close_session(session_id: &str) -> ApiResult<ChatSession> {
    let path = format!("sessions/{}/close", urlencoding::encode(session_id));
    post_json(&service_url(Service::Chat, &path), &EmptyBody {}).await
}

pub async fn fetch_link_preview(url: &str) -> ApiResult<LinkPreview> {
    get_json(&service_url_with_query(Service::LinkPreview, "", &PreviewQuery { url })).await
}
