use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::list_query::Filterable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatSessionStatus {
    Waiting,
    Active,
    Closed,
    #[serde(other)]
    Unknown,
}

impl ChatSessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ChatSessionStatus::Waiting => "Waiting",
            ChatSessionStatus::Active => "Active",
            ChatSessionStatus::Closed => "Closed",
            ChatSessionStatus::Unknown => "Unknown",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            ChatSessionStatus::Waiting => "warning",
            ChatSessionStatus::Active => "success",
            ChatSessionStatus::Closed | ChatSessionStatus::Unknown => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatSender {
    Customer,
    Agent,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    pub status: ChatSessionStatus,
    #[serde(default)]
    pub assigned_agent: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread_count: u32,
}

impl ChatSession {
    /// Assignment happens on the chat service; an agent may only claim a
    /// session nobody holds yet.
    pub fn can_claim(&self) -> bool {
        self.status == ChatSessionStatus::Waiting && self.assigned_agent.is_none()
    }

    pub fn is_open(&self) -> bool {
        self.status != ChatSessionStatus::Closed
    }
}

impl Filterable for ChatSession {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.customer_name.as_str()];
        fields.extend(self.customer_email.as_deref());
        fields.extend(self.assigned_agent.as_deref());
        fields
    }
}

/// Sessions with waiting customers first, then most recent activity.
pub fn order_sessions(sessions: &mut [ChatSession]) {
    sessions.sort_by(|a, b| {
        let waiting = |s: &ChatSession| s.status == ChatSessionStatus::Waiting;
        waiting(b)
            .cmp(&waiting(a))
            .then_with(|| b.last_message_at.cmp(&a.last_message_at))
    });
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub sender: ChatSender,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Message shown in the thread before the chat service confirms it.
    pub fn agent_draft(session_id: &str, agent: &str, content: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            sender: ChatSender::Agent,
            sender_name: Some(agent.to_string()),
            content: content.trim().to_string(),
            sent_at: now,
        }
    }

    pub fn urls(&self) -> Vec<String> {
        extract_urls(&self.content)
    }
}

/// Merge a freshly polled thread with optimistic drafts still in flight.
/// Drafts whose content already came back from the server are dropped.
pub fn merge_thread(server: Vec<ChatMessage>, drafts: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut merged = server;
    for draft in drafts {
        let confirmed = merged.iter().any(|m| {
            m.sender == ChatSender::Agent
                && m.content == draft.content
                && m.sent_at >= draft.sent_at - chrono::Duration::minutes(5)
        });
        if !confirmed {
            merged.push(draft.clone());
        }
    }
    merged.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
    merged
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub session_id: String,
    pub content: String,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Message is empty".into());
        }
        if self.content.chars().count() > 4000 {
            return Err("Message must be at most 4000 characters".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreview {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl LinkPreview {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.url)
    }
}

/// Distinct `http(s)://` links in order of appearance, with trailing
/// punctuation stripped.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        let Some(start) = word.find("http://").or_else(|| word.find("https://")) else {
            continue;
        };
        let url = word[start..].trim_end_matches(|c: char| {
            matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')' | ']' | '"' | '\'')
        });
        if url.len() > "https://".len() && !urls.iter().any(|u| u == url) {
            urls.push(url.to_string());
        }
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, minute, 0).unwrap()
    }

    fn session(id: &str, status: ChatSessionStatus, last: Option<u32>) -> ChatSession {
        ChatSession {
            id: id.into(),
            customer_name: format!("Customer {id}"),
            customer_email: None,
            status,
            assigned_agent: None,
            last_message_at: last.map(at),
            unread_count: 0,
        }
    }

    #[test]
    fn test_extract_urls() {
        let text = "See https://docs.example.com/manual.pdf, and (http://a.example/x). \
                    Again https://docs.example.com/manual.pdf or https:// nothing";
        assert_eq!(
            extract_urls(text),
            vec!["https://docs.example.com/manual.pdf", "http://a.example/x"]
        );
        assert!(extract_urls("no links here").is_empty());
    }

    #[test]
    fn test_order_sessions_waiting_first() {
        let mut sessions = vec![
            session("a", ChatSessionStatus::Active, Some(50)),
            session("b", ChatSessionStatus::Waiting, Some(10)),
            session("c", ChatSessionStatus::Active, Some(55)),
            session("d", ChatSessionStatus::Waiting, None),
        ];
        order_sessions(&mut sessions);
        let ids: Vec<_> = sessions.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "c", "a"]);
        assert!(sessions[0].can_claim());
    }

    #[test]
    fn test_merge_thread_drops_confirmed_drafts() {
        let draft = ChatMessage::agent_draft("s1", "Ana", " On my way ", at(10));
        let pending = ChatMessage::agent_draft("s1", "Ana", "Second", at(11));
        assert_eq!(draft.content, "On my way");

        let server = vec![ChatMessage {
            id: "42".into(),
            session_id: "s1".into(),
            sender: ChatSender::Agent,
            sender_name: Some("Ana".into()),
            content: "On my way".into(),
            sent_at: at(10),
        }];
        let merged = merge_thread(server, &[draft, pending.clone()]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "42");
        assert_eq!(merged[1].id, pending.id);
    }

    #[test]
    fn test_send_validation() {
        let req = SendMessageRequest {
            session_id: "s".into(),
            content: "   ".into(),
        };
        assert!(req.validate().is_err());
    }
}
