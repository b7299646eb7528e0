use std::cell::RefCell;

use crate::api::ChatBackend;
use crate::error::Result;
use crate::state::{ChatState, Speaker, CHAT_FAILED, NO_FILES_HINT, UPLOADING, UPLOAD_FAILED};
use crate::storage::SessionStore;
use crate::tokens::{RequestClass, RequestToken, RequestTokens};
use crate::types::SessionPayload;

/// Controller behind the UI.
///
/// Owns the view model and the active session id, issues every backend call
/// and applies responses. `notify` is invoked after each state change so the
/// UI can re-render from [`ChatClient::snapshot`].
pub struct ChatClient<B: ChatBackend, S: SessionStore> {
    backend: B,
    store: S,
    state: RefCell<ChatState>,
    tokens: RefCell<RequestTokens>,
    notify: Box<dyn Fn()>,
}

impl<B: ChatBackend, S: SessionStore> ChatClient<B, S> {
    pub fn new(backend: B, store: S, notify: impl Fn() + 'static) -> Self {
        Self {
            backend,
            store,
            state: RefCell::new(ChatState::default()),
            tokens: RefCell::new(RequestTokens::default()),
            notify: Box::new(notify),
        }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    fn update<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> R {
        let out = f(&mut self.state.borrow_mut());
        (self.notify)();
        out
    }

    fn issue(&self, class: RequestClass) -> RequestToken {
        self.tokens.borrow_mut().issue(class)
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.tokens.borrow().is_current(token)
    }

    /// Initial page load.
    pub async fn boot(&self) -> Result<()> {
        if let Err(e) = self.refresh_sessions().await {
            log::warn!("initial session list failed: {}", e);
        }

        let result = match self.store.load() {
            Some(stored) => match self.load_session(&stored).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    log::warn!("could not restore session {}: {}; starting a new one", stored, e);
                    self.create_session().await
                }
            },
            None => {
                log::info!("no stored session, starting a new one");
                self.create_session().await
            }
        };

        self.update(|state| state.booted = true);
        result
    }

    pub async fn refresh_sessions(&self) -> Result<()> {
        let token = self.issue(RequestClass::SessionList);
        let list = self.backend.list_sessions().await?;
        if !self.is_current(token) {
            log::debug!("dropping stale session list");
            return Ok(());
        }
        self.update(|state| state.sessions = list.sessions);
        Ok(())
    }

    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh_sessions().await {
            log::warn!("session list refresh failed: {}", e);
        }
    }

    pub async fn create_session(&self) -> Result<()> {
        let token = self.issue(RequestClass::Switch);
        let payload = self.backend.create_session().await?;
        log::info!("created session {}", payload.session.id);
        self.switch_to(token, payload).await;
        Ok(())
    }

    pub async fn load_session(&self, session_id: &str) -> Result<()> {
        let token = self.issue(RequestClass::Switch);
        let payload = self.backend.load_session(session_id).await?;
        log::info!("loaded session {}", payload.session.id);
        self.switch_to(token, payload).await;
        Ok(())
    }

    pub async fn select_session(&self, session_id: &str) -> Result<()> {
        self.load_session(session_id).await
    }

    async fn switch_to(&self, token: RequestToken, payload: SessionPayload) {
        if !self.is_current(token) {
            log::warn!("dropping stale response for session {}", payload.session.id);
            return;
        }
        self.update(|state| state.apply_session(&payload));
        if let Err(e) = self.store.save(&payload.session.id) {
            log::warn!("could not persist active session: {}", e);
        }
        self.refresh_after_mutation().await;
    }

    /// Whether a reply for `session_id` may still be shown.
    fn still_active(&self, session_id: &str) -> bool {
        self.state.borrow().active_id() == session_id
    }

    pub async fn send_message(&self, text: &str) {
        let msg = text.trim().to_string();
        if msg.is_empty() {
            return;
        }

        let (session_id, typing) = self.update(|state| {
            state.push_bubble(Speaker::User, format!("You: {}", msg), None);
            (state.active_id().to_string(), state.push_typing(None))
        });

        let result = self.backend.send_chat(&msg, &session_id).await;

        if !self.still_active(&session_id) {
            log::warn!("session changed while waiting for chat reply, dropping it");
            self.update(|state| state.remove_bubble(typing));
            return;
        }
        match result {
            Ok(reply) => {
                self.update(|state| {
                    state.remove_bubble(typing);
                    let meta = reply.source.map(|s| format!("Source: {}", s));
                    state.push_bubble(Speaker::Bot, format!("Assistant: {}", reply.response), meta);
                });
                self.refresh_after_mutation().await;
            }
            Err(e) => {
                log::error!("chat request failed: {}", e);
                self.update(|state| {
                    state.remove_bubble(typing);
                    state.push_bubble(Speaker::Bot, CHAT_FAILED, None);
                });
            }
        }
    }

    pub async fn upload(&self, files: Vec<B::Upload>) {
        if files.is_empty() {
            self.update(|state| state.push_bubble(Speaker::Bot, NO_FILES_HINT, None));
            return;
        }

        let (session_id, typing) = self.update(|state| {
            (state.active_id().to_string(), state.push_typing(Some(UPLOADING.to_string())))
        });

        let result = self.backend.upload(&files, &session_id).await;

        if !self.still_active(&session_id) {
            log::warn!("session changed while uploading, dropping upload result");
            self.update(|state| state.remove_bubble(typing));
            return;
        }
        match result {
            Ok(reply) => {
                self.update(|state| {
                    state.remove_bubble(typing);
                    for m in &reply.messages {
                        state.push_bubble(Speaker::Bot, format!("Assistant: {}", m), None);
                    }
                    state.pdf_list = reply.pdf_list;
                });
                self.refresh_after_mutation().await;
            }
            Err(e) => {
                log::error!("upload failed: {}", e);
                self.update(|state| {
                    state.remove_bubble(typing);
                    state.push_bubble(Speaker::Bot, UPLOAD_FAILED, None);
                });
            }
        }
    }

    pub fn clear_view(&self) {
        self.update(|state| state.clear_view());
    }
}
