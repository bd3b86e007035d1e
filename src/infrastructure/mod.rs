//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Gestão REST API client.
pub mod gestao;
/// Identity provider client.
pub mod identity;
/// Session storage adapters.
pub mod storage;

pub use config::{ApiConfig, AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use gestao::GestaoHttpClient;
pub use identity::IdentityClient;
#[cfg(feature = "keyring")]
pub use storage::KeyringSessionStorage;
pub use storage::{MemorySessionStorage, default_session_storage};
