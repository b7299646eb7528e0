use async_trait::async_trait;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response};

use crate::config::ClientConfig;
use crate::error::{describe, ClientError, Result};
use crate::types::{parse, ChatReply, ChatRequest, SessionList, SessionPayload, UploadReply};

/// The five backend calls the client makes.
///
/// `Upload` is whatever the UI hands over as a selected file; in the browser
/// that is a `web_sys::File`.
#[async_trait(?Send)]
pub trait ChatBackend {
    type Upload;

    async fn list_sessions(&self) -> Result<SessionList>;
    async fn create_session(&self) -> Result<SessionPayload>;
    async fn load_session(&self, session_id: &str) -> Result<SessionPayload>;
    async fn send_chat(&self, message: &str, session_id: &str) -> Result<ChatReply>;
    async fn upload(&self, files: &[Self::Upload], session_id: &str) -> Result<UploadReply>;
}

/// `fetch`-based backend talking to the endpoints under `ClientConfig::api_base`.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn request(&self, method: &str, path: &str, body: Option<&JsValue>, json: bool) -> Result<Request> {
        let opts = RequestInit::new();
        opts.set_method(method);
        if json {
            let headers = Headers::new()?;
            headers.set("Content-Type", "application/json")?;
            opts.set_headers(&headers.into());
        }
        if let Some(body) = body {
            opts.set_body(body);
        }
        let url = self.config.url(path);
        log::debug!("{} {}", method, url);
        Ok(Request::new_with_str_and_init(&url, &opts)?)
    }

    async fn fetch_text(&self, request: Request) -> Result<String> {
        let window = web_sys::window().ok_or_else(|| ClientError::Js("window not available".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::Network(describe(&e)))?;
        let resp: Response = resp_value.dyn_into()?;
        if !resp.ok() {
            return Err(ClientError::Status(resp.status()));
        }
        let text = JsFuture::from(resp.text()?)
            .await
            .map_err(|e| ClientError::Network(describe(&e)))?;
        text.as_string()
            .ok_or_else(|| ClientError::Decode("response body is not text".into()))
    }
}

#[async_trait(?Send)]
impl ChatBackend for HttpBackend {
    type Upload = web_sys::File;

    async fn list_sessions(&self) -> Result<SessionList> {
        let request = self.request("GET", "/api/sessions", None, false)?;
        parse(&self.fetch_text(request).await?)
    }

    async fn create_session(&self) -> Result<SessionPayload> {
        let request = self.request("POST", "/api/session/new", None, false)?;
        parse(&self.fetch_text(request).await?)
    }

    async fn load_session(&self, session_id: &str) -> Result<SessionPayload> {
        let encoded: String = js_sys::encode_uri_component(session_id).into();
        let request = self.request("GET", &format!("/api/session/{}", encoded), None, false)?;
        parse(&self.fetch_text(request).await?)
    }

    async fn send_chat(&self, message: &str, session_id: &str) -> Result<ChatReply> {
        let body = serde_json::to_string(&ChatRequest { message, session_id })?;
        let request = self.request("POST", "/chat", Some(&JsValue::from_str(&body)), true)?;
        parse(&self.fetch_text(request).await?)
    }

    async fn upload(&self, files: &[web_sys::File], session_id: &str) -> Result<UploadReply> {
        let form = FormData::new()?;
        for file in files {
            form.append_with_blob_and_filename("pdfs", file, &file.name())?;
        }
        form.append_with_str("session_id", session_id)?;
        let request = self.request("POST", "/upload", Some(&form.into()), false)?;
        parse(&self.fetch_text(request).await?)
    }
}
