//! Domain layer with the canonical records, screen routes and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Screen addresses.
pub mod route;
/// Serde utilities.
pub mod serde_utils;
/// Form input rules.
pub mod validation;

pub use entities::{AccessToken, RecordId, Session, SessionUser};
pub use errors::{ApiError, AuthError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{GestaoApiPort, IdentityPort, SessionPort, SessionStoragePort};
pub use route::Route;
pub use validation::FieldErrors;
