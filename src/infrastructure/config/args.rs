use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gestao",
    version,
    about = "Terminal administration client for células, cultos and the escola bíblica",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the gestão REST API.
    #[arg(long, env = "GESTAO_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Base URL of the identity provider.
    #[arg(long, env = "GESTAO_AUTH_URL", value_name = "URL")]
    pub auth_url: Option<String>,

    /// Public key sent to the identity provider.
    #[arg(long, env = "GESTAO_AUTH_PUBLIC_KEY", hide_env_values = true)]
    pub auth_public_key: Option<String>,

    /// Access token to use instead of logging in.
    #[arg(long, env = "GESTAO_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Screen to open after login, e.g. `/celulas/7`.
    #[arg(long, value_name = "PATH")]
    pub open: Option<String>,

    /// HTTP request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Notification duration in seconds.
    #[arg(long)]
    pub notification_duration: Option<u64>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Do not keep the session in the system keyring.
    #[arg(long)]
    pub no_save_session: bool,
}
