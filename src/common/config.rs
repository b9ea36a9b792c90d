//! Configuration file handling
//!
//! Values are layered: built-in defaults, then `config.toml`, then
//! `STORY_HARNESS_*` environment variables, then CLI flags (applied by the
//! caller).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Base URL of the public Story Spoiler deployment
pub const DEFAULT_BASE_URL: &str = "https://d3s5nxhwblsjbi.cloudfront.net";

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Target API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Login credentials
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Scenario settings
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

/// Target API settings
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Login credentials
#[derive(Deserialize, Clone)]
pub struct CredentialsConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn default_username() -> String {
    "qatestertedd".to_string()
}

fn default_password() -> String {
    "123456".to_string()
}

/// HTTP client settings
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Per-request timeout; the client's default (none) when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("story-harness/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Scenario settings
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScenarioConfig {
    /// Append the repeat-delete step after the standard sequence
    #[serde(default)]
    pub idempotence_check: bool,

    /// YAML file overriding the request payloads
    #[serde(default)]
    pub fixtures: Option<PathBuf>,
}

/// Environment variables recognised as overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    BaseUrl,
    Username,
    Password,
}

impl HarnessEnv {
    pub const ALL: [HarnessEnv; 3] = [Self::BaseUrl, Self::Username, Self::Password];

    /// Returns the environment variable name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "STORY_HARNESS_BASE_URL",
            Self::Username => "STORY_HARNESS_USERNAME",
            Self::Password => "STORY_HARNESS_PASSWORD",
        }
    }
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply `STORY_HARNESS_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// A variable that is set but empty is rejected rather than ignored.
    /// Surrounding whitespace is stripped from the URL and username only;
    /// the password is taken verbatim.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        for var in HarnessEnv::ALL {
            let Some(value) = lookup(var.as_str()) else {
                continue;
            };
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(Error::Config(format!("{} is set but empty", var.as_str())));
            }
            match var {
                HarnessEnv::BaseUrl => self.api.base_url = trimmed.to_string(),
                HarnessEnv::Username => self.credentials.username = trimmed.to_string(),
                HarnessEnv::Password => self.credentials.password = value,
            }
        }
        Ok(self)
    }

    /// Check that the resolved values are usable
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.api.base_url)?;
        if self.http.timeout_secs == Some(0) {
            return Err(Error::Config(
                "http.timeout_secs must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Check that a base URL is an absolute http(s) URL
pub fn validate_base_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url).map_err(|e| Error::InvalidBaseUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::InvalidBaseUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
