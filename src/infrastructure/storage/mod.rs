//! Session storage adapters.

#[cfg(feature = "keyring")]
mod keyring_storage;
mod memory_storage;

#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringSessionStorage;
pub use memory_storage::MemorySessionStorage;

use std::sync::Arc;

use crate::domain::ports::SessionStoragePort;

/// Returns the best available session store for this build.
#[must_use]
pub fn default_session_storage() -> Arc<dyn SessionStoragePort> {
    #[cfg(feature = "keyring")]
    {
        Arc::new(KeyringSessionStorage::new())
    }
    #[cfg(not(feature = "keyring"))]
    {
        Arc::new(MemorySessionStorage::new())
    }
}
