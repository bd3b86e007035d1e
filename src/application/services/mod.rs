//! Application services.

mod gestao_client;
mod notification_manager;
mod session_accessor;

pub use gestao_client::GestaoClient;
pub use notification_manager::NotificationManager;
pub use session_accessor::SessionAccessor;
