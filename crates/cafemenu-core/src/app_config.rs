use std::path::PathBuf;

use crate::ConfigError;

pub const FEED_URL_VAR: &str = "CAFEMENU_FEED_URL";

#[derive(Clone)]
pub struct AppConfig {
    /// Published CSV export of the menu spreadsheet.
    pub feed_url: Option<String>,
    /// Prefix of the CORS relay; `None` fetches the feed directly.
    pub cors_proxy: Option<String>,
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub storage_path: PathBuf,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub log_level: String,
}

impl AppConfig {
    /// The feed URL, for commands that need the menu.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when no feed is configured.
    pub fn require_feed_url(&self) -> Result<&str, ConfigError> {
        self.feed_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(FEED_URL_VAR.to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("feed_url", &self.feed_url.as_ref().map(|_| "[redacted]"))
            .field("cors_proxy", &self.cors_proxy)
            .field("backend_url", &self.backend_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("storage_path", &self.storage_path)
            .field("user_id", &self.user_id)
            .field("user_name", &self.user_name)
            .field("log_level", &self.log_level)
            .finish()
    }
}
