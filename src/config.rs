/// Where the backend lives and where the active session id is persisted.
///
/// A browser bundle has no process environment, so the values are captured
/// at compile time from `CHAT_API_BASE` and `CHAT_SESSION_KEY`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub storage_key: String,
}

pub const DEFAULT_STORAGE_KEY: &str = "ssc_session_id";

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            api_base: option_env!("CHAT_API_BASE")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            storage_key: option_env!("CHAT_SESSION_KEY")
                .unwrap_or(DEFAULT_STORAGE_KEY)
                .to_string(),
        }
    }

    pub fn with_base(api_base: impl Into<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_urls_stay_relative() {
        let config = ClientConfig::with_base("");
        assert_eq!(config.url("/api/sessions"), "/api/sessions");
        assert_eq!(config.url("chat"), "/chat");
    }

    #[test]
    fn base_url_is_joined_without_double_slash() {
        let config = ClientConfig::with_base("http://127.0.0.1:5022/");
        assert_eq!(config.url("/upload"), "http://127.0.0.1:5022/upload");
        assert_eq!(config.storage_key, "ssc_session_id");
    }
}
