//! Durable identity storage seam.
//!
//! The container persists exactly one record: the signed-in user as JSON under
//! [`STORAGE_KEY`]. Stores deal in raw strings so that decoding, and therefore
//! the corrupt-data recovery path, stays in one place in the container.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::StoreError;

/// Key of the persisted user record.
pub const STORAGE_KEY: &str = "internmatch_user";

/// Client-local persistent storage holding one serialized record.
pub trait IdentityStore {
    /// Read the raw record. `Ok(None)` means no session was stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the raw record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage rejects the write.
    fn save(&self, raw: &str) -> Result<(), StoreError>;

    /// Remove the record. Best-effort.
    fn clear(&self);
}

/// In-memory store. Clones share the same slot, which lets tests hand one
/// "browser profile" to several containers.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `raw`.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(raw.into()))) }
    }

    /// Current raw contents.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl IdentityStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(raw.to_owned());
        Ok(())
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
