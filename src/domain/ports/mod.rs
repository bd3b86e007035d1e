mod gestao_api_port;
mod identity_port;
mod session_port;
mod session_storage_port;

pub use gestao_api_port::GestaoApiPort;
pub use identity_port::IdentityPort;
pub use session_port::SessionPort;
pub use session_storage_port::SessionStoragePort;
