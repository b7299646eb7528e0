use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// One row of `GET /api/sessions`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub pdf_count: u32,
    #[serde(default)]
    pub message_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub meta: Option<String>,
}

/// Body of both `POST /api/session/new` and `GET /api/session/{id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SessionPayload {
    pub session: SessionInfo,
    #[serde(default)]
    pub pdf_list: Vec<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub pdf_list: Vec<String>,
}

/// Boundary checks applied after a body has been deserialized.
pub trait Validate: Sized {
    fn validate(self) -> Result<Self>;
}

impl Validate for SessionList {
    fn validate(self) -> Result<Self> {
        if self.sessions.iter().any(|s| s.id.trim().is_empty()) {
            return Err(ClientError::Invalid("session list entry without id".into()));
        }
        Ok(self)
    }
}

impl Validate for SessionPayload {
    fn validate(self) -> Result<Self> {
        if self.session.id.trim().is_empty() {
            return Err(ClientError::Invalid("session payload without id".into()));
        }
        Ok(self)
    }
}

impl Validate for ChatReply {
    fn validate(mut self) -> Result<Self> {
        if self.source.as_deref().map_or(false, |s| s.trim().is_empty()) {
            self.source = None;
        }
        Ok(self)
    }
}

impl Validate for UploadReply {
    fn validate(mut self) -> Result<Self> {
        self.pdf_list.retain(|name| !name.trim().is_empty());
        Ok(self)
    }
}

/// Deserialize a JSON body and run its boundary checks.
pub fn parse<T>(body: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Validate,
{
    serde_json::from_str::<T>(body)?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_list() {
        let body = r#"{"sessions":[{"id":"a","name":"Chat 1","created_at":"2024-01-01T00:00:00Z","pdf_count":0,"message_count":2}]}"#;
        let list: SessionList = parse(body).unwrap();
        assert_eq!(list.sessions.len(), 1);
        assert_eq!(list.sessions[0].name, "Chat 1");
        assert_eq!(list.sessions[0].message_count, 2);
    }

    #[test]
    fn missing_session_array_is_empty() {
        let list: SessionList = parse("{}").unwrap();
        assert!(list.sessions.is_empty());
    }

    #[test]
    fn unknown_roles_collapse_to_other() {
        let body = r#"{
            "session": {"id": "s1", "name": "Chat 3", "created_at": "2024-01-01T00:00:00Z"},
            "history": [
                {"role": "system", "text": "New chat created.", "meta": null, "ts": "x"},
                {"role": "bot", "text": "Assistant: hi", "meta": "Source: a.pdf"}
            ]
        }"#;
        let payload: SessionPayload = parse(body).unwrap();
        assert_eq!(payload.history[0].role, Role::Other);
        assert_eq!(payload.history[1].meta.as_deref(), Some("Source: a.pdf"));
        assert!(payload.pdf_list.is_empty());
    }

    #[test]
    fn session_payload_requires_an_id() {
        let err = parse::<SessionPayload>(r#"{"session":{"id":"  "}}"#).unwrap_err();
        assert!(matches!(err, ClientError::Invalid(_)));

        let err = parse::<SessionPayload>(r#"{"history":[]}"#).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn chat_reply_drops_blank_source() {
        let reply: ChatReply = parse(r#"{"response":"Hello","source":""}"#).unwrap();
        assert_eq!(reply.source, None);
        let reply: ChatReply = parse(r#"{"response":"Hello","source":null}"#).unwrap();
        assert_eq!(reply.source, None);
        assert!(parse::<ChatReply>(r#"{"source":"doc.pdf"}"#).is_err());
    }

    #[test]
    fn upload_reply_drops_blank_pdf_names() {
        let reply: UploadReply =
            parse(r#"{"messages":["✅ Indexed a.pdf"],"pdf_list":["a.pdf"," ",""],"session_id":"s1"}"#).unwrap();
        assert_eq!(reply.pdf_list, ["a.pdf"]);
        assert_eq!(reply.messages.len(), 1);
    }

    #[test]
    fn chat_request_serializes_expected_fields() {
        let body = serde_json::to_value(ChatRequest { message: "hi", session_id: "s1" }).unwrap();
        assert_eq!(body, serde_json::json!({"message": "hi", "session_id": "s1"}));
    }
}
