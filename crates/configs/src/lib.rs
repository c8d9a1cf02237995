use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Where the REST API lives and how to talk to it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Prefix for relative `imageUrl` values; defaults to the API origin.
    #[serde(default)]
    pub image_base_url: String,
    /// Path prefix of the login/logout endpoints. Empty mounts them at `/login`, `/logout`.
    #[serde(default = "default_auth_prefix")]
    pub auth_prefix: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: String::new(),
            auth_prefix: default_auth_prefix(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session flag file; `~/` is expanded.
    #[serde(default = "default_session_path")]
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { path: default_session_path() }
    }
}

fn default_base_url() -> String { "http://localhost:8080/api".into() }
fn default_auth_prefix() -> String { "/auth".into() }
fn default_timeout() -> u64 { 30 }
fn default_session_path() -> String { "~/.petrack/session.json".into() }

/// Config file location: `CONFIG_PATH` or `~/.petrack/config.toml`.
pub fn default_path() -> PathBuf {
    std::env::var("CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| common::env::state_dir().join("config.toml"))
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&default_path())
}

/// Load from a TOML file. A missing file yields the defaults.
pub fn load_from_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)
        .map_err(|e| anyhow!("invalid config {}: {e}", path.display()))?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => load_from_file(p)?,
            None => load_default()?,
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        self.api.normalize();
        if self.session.path.trim().is_empty() {
            self.session.path = default_session_path();
        }
        Ok(())
    }

    pub fn session_path(&self) -> PathBuf {
        common::env::expand_home(&self.session.path)
    }
}

impl ApiConfig {
    /// Environment wins over the file: `PETRACK_API_URL`, `PETRACK_IMAGE_URL`.
    pub fn normalize_from_env(&mut self) {
        if let Ok(url) = std::env::var("PETRACK_API_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(url) = std::env::var("PETRACK_IMAGE_URL") {
            if !url.trim().is_empty() {
                self.image_base_url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let lower = self.base_url.trim().to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.image_base_url.trim().is_empty() {
            self.image_base_url = origin_of(&self.base_url).to_string();
        }
        self.image_base_url = self.image_base_url.trim().trim_end_matches('/').to_string();
        let prefix = self.auth_prefix.trim().trim_matches('/');
        self.auth_prefix = if prefix.is_empty() { String::new() } else { format!("/{prefix}") };
    }

    /// Path of an auth endpoint, e.g. `login` -> `/auth/login`.
    pub fn auth_path(&self, endpoint: &str) -> String {
        format!("{}/{}", self.auth_prefix, endpoint.trim_start_matches('/'))
    }
}

/// `scheme://host[:port]` part of a URL.
fn origin_of(url: &str) -> &str {
    let after_scheme = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[after_scheme..].find('/') {
        Some(i) => &url[..after_scheme + i],
        None => url,
    }
}
