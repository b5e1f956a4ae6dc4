use std::{fs, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "docqa.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub server_url: String,
    pub upload_path: String,
    pub ask_path: String,
    /// Unset means a request waits until the transport gives up on its own.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8888".into(),
            upload_path: "/upload".into(),
            ask_path: "/ask".into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn upload_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(&self.upload_path)
    }

    pub fn ask_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(&self.ask_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    // Endpoint paths are resolved below the server URL, so a server mounted at
    // `http://host/qa` keeps its prefix.
    fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(self.server_url.trim())?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/'))
    }
}

pub fn load_settings() -> ClientSettings {
    let file_raw = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file_raw.as_deref(), |key| std::env::var(key).ok())
}

/// Layers `docqa.toml` contents, then environment overrides, over the defaults.
pub fn load_settings_from(
    file_raw: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = match file_raw.map(toml::from_str::<ClientSettings>) {
        Some(Ok(file_cfg)) => file_cfg,
        Some(Err(err)) => {
            warn!(file = SETTINGS_FILE, %err, "ignoring unreadable settings file");
            ClientSettings::default()
        }
        None => ClientSettings::default(),
    };

    if let Some(v) = env("DOCQA_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__UPLOAD_PATH") {
        settings.upload_path = v;
    }
    if let Some(v) = env("APP__ASK_PATH") {
        settings.ask_path = v;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(0) => settings.request_timeout_secs = None,
            Ok(secs) => settings.request_timeout_secs = Some(secs),
            Err(err) => warn!(value = %v, %err, "ignoring APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
