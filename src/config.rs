use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "https://basic.bd-d.online/";

/// Upper bound for any single timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Raw, serde-loadable settings. Every field has a default so a partial JSON file works.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    /// Backend root; must end with `/` so relative endpoint paths join beneath it.
    #[serde(default = "ClientSettings::default_base_url")]
    pub base_url: String,
    #[serde(default = "ClientSettings::default_connect_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "ClientSettings::default_io_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "ClientSettings::default_io_secs")]
    pub write_timeout_secs: u64,
    /// Sent with login so the backend can label the issued token.
    #[serde(default = "ClientSettings::default_device_name")]
    pub device_name: String,
    /// Where the session token and role are persisted.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
}

impl ClientSettings {
    fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
    fn default_connect_secs() -> u64 { 30 }
    fn default_io_secs() -> u64 { 45 }
    fn default_device_name() -> String { "android".to_string() }

    pub fn from_json_file(path: &Path) -> ClientResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ClientError::validation(format!("cannot read settings '{}': {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::validation(format!("invalid settings '{}': {}", path.display(), e)))
    }

    /// Apply `SOCIETY_*` environment overrides on top of these settings.
    pub fn with_env_overrides(mut self) -> ClientResult<Self> {
        if let Ok(v) = std::env::var("SOCIETY_BASE_URL") { self.base_url = v; }
        if let Ok(v) = std::env::var("SOCIETY_CONNECT_TIMEOUT_SECS") { self.connect_timeout_secs = parse_secs("SOCIETY_CONNECT_TIMEOUT_SECS", &v)?; }
        if let Ok(v) = std::env::var("SOCIETY_READ_TIMEOUT_SECS") { self.read_timeout_secs = parse_secs("SOCIETY_READ_TIMEOUT_SECS", &v)?; }
        if let Ok(v) = std::env::var("SOCIETY_WRITE_TIMEOUT_SECS") { self.write_timeout_secs = parse_secs("SOCIETY_WRITE_TIMEOUT_SECS", &v)?; }
        if let Ok(v) = std::env::var("SOCIETY_DEVICE_NAME") { self.device_name = v; }
        if let Ok(v) = std::env::var("SOCIETY_CREDENTIALS") { self.credentials_path = Some(PathBuf::from(v)); }
        Ok(self)
    }

    pub fn into_config(self) -> ClientResult<ClientConfig> {
        let base_url = parse_base_url(&self.base_url)?;
        for (name, secs) in [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("read_timeout_secs", self.read_timeout_secs),
            ("write_timeout_secs", self.write_timeout_secs),
        ] {
            if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
                return Err(ClientError::validation(format!("{} must be within 1..={}, got {}", name, MAX_TIMEOUT_SECS, secs)));
            }
        }
        let device_name = self.device_name.trim().to_string();
        if device_name.is_empty() {
            return Err(ClientError::validation("device name must not be blank"));
        }
        let credentials_path = match self.credentials_path {
            Some(p) => p,
            None => default_credentials_path()?,
        };
        Ok(ClientConfig {
            base_url,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            write_timeout: Duration::from_secs(self.write_timeout_secs),
            device_name,
            credentials_path,
        })
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            connect_timeout_secs: Self::default_connect_secs(),
            read_timeout_secs: Self::default_io_secs(),
            write_timeout_secs: Self::default_io_secs(),
            device_name: Self::default_device_name(),
            credentials_path: None,
        }
    }
}

/// Validated configuration handed to the transport and facade.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub device_name: String,
    pub credentials_path: PathBuf,
}

impl ClientConfig {
    /// Defaults plus environment overrides.
    pub fn from_env() -> ClientResult<Self> {
        ClientSettings::default().with_env_overrides()?.into_config()
    }

    /// Config for an explicit base URL with default timeouts; handy for tests and tools.
    pub fn for_base_url(base_url: &str, credentials_path: impl Into<PathBuf>) -> ClientResult<Self> {
        ClientSettings {
            base_url: base_url.to_string(),
            credentials_path: Some(credentials_path.into()),
            ..ClientSettings::default()
        }
        .into_config()
    }
}

pub fn parse_base_url(raw: &str) -> ClientResult<Url> {
    let trimmed = raw.trim();
    if !trimmed.ends_with('/') {
        return Err(ClientError::validation(format!("base URL '{}' must end with '/'", trimmed)));
    }
    let url = Url::parse(trimmed).map_err(|e| ClientError::validation(format!("invalid base URL '{}': {}", trimmed, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::validation(format!("unsupported base URL scheme '{}'", other))),
    }
}

fn parse_secs(name: &str, raw: &str) -> ClientResult<u64> {
    raw.trim().parse::<u64>().map_err(|_| ClientError::validation(format!("{} must be a whole number of seconds, got '{}'", name, raw)))
}

fn default_credentials_path() -> ClientResult<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| ClientError::validation("HOME is unset; set SOCIETY_CREDENTIALS"))?;
    Ok(PathBuf::from(home).join(".config").join("society-client").join("credentials.json"))
}
