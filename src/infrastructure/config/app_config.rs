//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;

pub(super) const APP_NAME: &str = "gestao";
pub(super) const APP_QUALIFIER: &str = "br";
pub(super) const APP_ORGANIZATION: &str = "gestao";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, loaded from `config.toml` and overridden by CLI/env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Keep sessions in the system keyring between runs.
    #[serde(default = "default_true")]
    pub persist_session: bool,

    /// Remote endpoints.
    #[serde(default)]
    pub api: ApiConfig,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote endpoints and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the gestão REST API.
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Base URL of the identity provider.
    #[serde(default)]
    pub auth_url: Option<String>,

    /// Public (anonymous) key sent to the identity provider.
    #[serde(default)]
    pub auth_public_key: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            auth_url: None,
            auth_public_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Notification duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Enable mouse support.
    #[serde(default)]
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            mouse: false,
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_true() -> bool {
    true
}

const fn default_notification_duration() -> u64 {
    5
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = non_blank(args.api_url.as_deref()) {
            self.api.base_url = api_url;
        }
        if let Some(auth_url) = non_blank(args.auth_url.as_deref()) {
            self.api.auth_url = Some(auth_url);
        }
        if let Some(key) = non_blank(args.auth_public_key.as_deref()) {
            self.api.auth_public_key = Some(key);
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_secs = timeout;
        }
        if let Some(notification_duration) = args.notification_duration {
            self.ui.notification_duration = notification_duration;
        }
        if let Some(mouse) = args.mouse {
            self.ui.mouse = mouse;
        }
        if args.no_save_session {
            self.persist_session = false;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("gestao.log"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            persist_session: true,
            api: ApiConfig::default(),
            ui: UiConfig::default(),
        }
    }
}
