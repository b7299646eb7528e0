use chrono::DateTime;

use crate::types::{ChatMessage, Role, SessionPayload, SessionSummary};

pub const EMPTY_HISTORY: &str = "Assistant: This chat is empty. Upload PDFs to begin.";
pub const CLEARED_NOTICE: &str = "Assistant: Cleared view. Select the chat again to reload full history.";
pub const NO_FILES_HINT: &str = "Assistant: Choose one or more PDFs first.";
pub const CHAT_FAILED: &str = "Assistant: ⚠️ Backend error. Check terminal logs.";
pub const UPLOAD_FAILED: &str = "Assistant: ⚠️ Upload failed. Check terminal logs.";
pub const UPLOADING: &str = "Uploading & indexing PDFs…";
pub const EMPTY_PDF_LIST: &str = "Upload PDFs to see them here.";
pub const EMPTY_SESSION_LIST: &str = "No chats yet.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    pub fn class(&self) -> &'static str {
        match self {
            Speaker::User => "msg user",
            Speaker::Bot => "msg bot",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub id: u64,
    pub speaker: Speaker,
    pub text: String,
    pub meta: Option<String>,
    /// Placeholder shown while a request is in flight.
    pub typing: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Header {
    pub name: String,
    pub meta: String,
}

impl Default for Header {
    fn default() -> Self {
        Self { name: "Chat".to_string(), meta: "—".to_string() }
    }
}

/// Everything the UI renders, owned by the client controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatState {
    pub active_session_id: Option<String>,
    pub header: Header,
    pub bubbles: Vec<Bubble>,
    pub pdf_list: Vec<String>,
    pub sessions: Vec<SessionSummary>,
    pub booted: bool,
    next_bubble: u64,
}

impl ChatState {
    pub fn push_bubble(&mut self, speaker: Speaker, text: impl Into<String>, meta: Option<String>) -> u64 {
        self.push(speaker, text.into(), meta, false)
    }

    pub fn push_typing(&mut self, meta: Option<String>) -> u64 {
        self.push(Speaker::Bot, String::new(), meta, true)
    }

    fn push(&mut self, speaker: Speaker, text: String, meta: Option<String>, typing: bool) -> u64 {
        self.next_bubble += 1;
        let id = self.next_bubble;
        self.bubbles.push(Bubble { id, speaker, text, meta, typing });
        id
    }

    pub fn remove_bubble(&mut self, id: u64) {
        self.bubbles.retain(|b| b.id != id);
    }

    /// Display-only; the active session and server state are untouched.
    pub fn clear_view(&mut self) {
        self.bubbles.clear();
        self.push_bubble(Speaker::Bot, CLEARED_NOTICE, None);
    }

    pub fn render_history(&mut self, history: &[ChatMessage]) {
        self.bubbles.clear();
        if history.is_empty() {
            self.push_bubble(Speaker::Bot, EMPTY_HISTORY, None);
            return;
        }
        for msg in history {
            match msg.role {
                Role::User => self.push_bubble(Speaker::User, msg.text.clone(), None),
                Role::Bot => self.push_bubble(Speaker::Bot, msg.text.clone(), msg.meta.clone()),
                Role::Other => self.push_bubble(Speaker::Bot, format!("Assistant: {}", msg.text), None),
            };
        }
    }

    /// Make a create/load response the displayed session.
    pub fn apply_session(&mut self, payload: &SessionPayload) {
        self.active_session_id = Some(payload.session.id.clone());
        self.header = Header {
            name: if payload.session.name.is_empty() {
                "Chat".to_string()
            } else {
                payload.session.name.clone()
            },
            meta: payload
                .session
                .created_at
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!("Created: {}", format_date_time(c)))
                .unwrap_or_else(|| "—".to_string()),
        };
        self.pdf_list = payload.pdf_list.clone();
        self.render_history(&payload.history);
    }

    pub fn is_active(&self, session: &SessionSummary) -> bool {
        self.active_session_id.as_deref() == Some(session.id.as_str())
    }

    pub fn active_id(&self) -> &str {
        self.active_session_id.as_deref().unwrap_or_default()
    }
}

pub fn session_meta(session: &SessionSummary) -> String {
    format!("{} PDF(s) • {} msg", session.pdf_count, session.message_count)
}

pub fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn format_date_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionInfo;

    fn msg(role: Role, text: &str, meta: Option<&str>) -> ChatMessage {
        ChatMessage { role, text: text.to_string(), meta: meta.map(str::to_string) }
    }

    #[test]
    fn session_row_labels() {
        let s = SessionSummary {
            id: "a".into(),
            name: "Chat 1".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            pdf_count: 0,
            message_count: 2,
        };
        assert_eq!(session_meta(&s), "0 PDF(s) • 2 msg");
        assert_eq!(format_date(&s.created_at), "2024-01-01");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn history_maps_roles_to_bubbles() {
        let mut state = ChatState::default();
        state.render_history(&[
            msg(Role::Other, "New chat created.", None),
            msg(Role::User, "You: hi", None),
            msg(Role::Bot, "Assistant: hello", Some("Source: a.pdf")),
        ]);
        let texts: Vec<_> = state.bubbles.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, ["Assistant: New chat created.", "You: hi", "Assistant: hello"]);
        assert_eq!(state.bubbles[1].speaker, Speaker::User);
        assert_eq!(state.bubbles[2].meta.as_deref(), Some("Source: a.pdf"));
    }

    #[test]
    fn empty_history_shows_hint() {
        let mut state = ChatState::default();
        state.render_history(&[]);
        assert_eq!(state.bubbles.len(), 1);
        assert_eq!(state.bubbles[0].text, EMPTY_HISTORY);
    }

    #[test]
    fn typing_bubble_is_removed_by_id() {
        let mut state = ChatState::default();
        state.push_bubble(Speaker::User, "You: q", None);
        let typing = state.push_typing(None);
        state.push_bubble(Speaker::Bot, "other", None);
        state.remove_bubble(typing);
        assert_eq!(state.bubbles.len(), 2);
        assert!(state.bubbles.iter().all(|b| !b.typing));
    }

    #[test]
    fn apply_session_sets_header_and_active_id() {
        let mut state = ChatState::default();
        state.apply_session(&SessionPayload {
            session: SessionInfo {
                id: "s1".into(),
                name: String::new(),
                created_at: Some("2024-03-05T10:20:30Z".into()),
            },
            pdf_list: vec!["a.pdf".into()],
            history: vec![],
        });
        assert_eq!(state.active_id(), "s1");
        assert_eq!(state.header.name, "Chat");
        assert_eq!(state.header.meta, "Created: 2024-03-05 10:20:30");
        assert_eq!(state.pdf_list, ["a.pdf"]);
    }

    #[test]
    fn clear_view_keeps_session() {
        let mut state = ChatState::default();
        state.active_session_id = Some("s1".into());
        state.push_bubble(Speaker::User, "You: q", None);
        state.clear_view();
        assert_eq!(state.bubbles.len(), 1);
        assert_eq!(state.bubbles[0].text, CLEARED_NOTICE);
        assert_eq!(state.active_id(), "s1");
    }
}
