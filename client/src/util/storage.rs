//! Browser localStorage identity store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session container persists the signed-in user through this store
//! under [`session::STORAGE_KEY`], so a reload restores the session without
//! a network round trip.
//!
//! TRADE-OFFS
//! ==========
//! Outside the browser there is no storage: loads find nothing and writes
//! report [`StoreError::Unavailable`], which the container logs and ignores.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use session::{IdentityStore, StoreError};

/// [`IdentityStore`] over `window.localStorage`.
#[derive(Clone, Debug)]
pub struct LocalStore {
    key: &'static str,
}

impl Default for LocalStore {
    fn default() -> Self {
        Self { key: session::STORAGE_KEY }
    }
}

impl LocalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StoreError::Unavailable)
}

impl IdentityStore for LocalStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(self.key)
                .map_err(|_| StoreError::Unavailable)
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(None)
        }
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(self.key, raw)
                .map_err(|e| StoreError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = raw;
            Err(StoreError::Unavailable)
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Ok(storage) = local_storage() {
                let _ = storage.remove_item(self.key);
            }
        }
    }
}
