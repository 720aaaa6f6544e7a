use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "crud_client.toml";
pub const DEFAULT_API_BASE_URL: &str = "https://reqres.in/api";
pub const DEFAULT_USERS_PAGE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub users_page: u32,
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            users_page: DEFAULT_USERS_PAGE,
            api_key: None,
            request_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    users_page: Option<u32>,
    api_key: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `crud_client.toml` in the working directory, then `APP__*` env vars.
pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                if let Some(v) = file_cfg.users_page {
                    settings.users_page = v;
                }
                if let Some(v) = file_cfg.api_key {
                    settings.api_key = Some(v);
                }
                if let Some(v) = file_cfg.request_timeout_secs.filter(|secs| *secs > 0) {
                    settings.request_timeout_secs = v;
                }
            }
            Err(err) => warn!(path = %path.display(), "ignoring unreadable settings file: {err}"),
        }
    }

    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__USERS_PAGE") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.users_page = parsed;
        }
    }

    if let Some(v) = env("REQRES_API_KEY") {
        settings.api_key = Some(v);
    }
    if let Some(v) = env("APP__API_KEY") {
        settings.api_key = Some(v);
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        // A zero timeout would fail every request before it is sent.
        if let Ok(parsed @ 1..) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if settings
        .api_key
        .as_deref()
        .is_some_and(|key| key.trim().is_empty())
    {
        settings.api_key = None;
    }

    settings
}

/// Validates an http(s) base URL and strips the trailing slash so paths can be appended.
pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    let parsed =
        Url::parse(trimmed).with_context(|| format!("invalid api base url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "unsupported scheme '{}' in api base url '{trimmed}'",
            parsed.scheme()
        );
    }
    if parsed.query().is_some() {
        bail!("api base url '{trimmed}' must not carry a query string");
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
