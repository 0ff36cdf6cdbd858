//! Cookie session tokens.
//!
//! DESIGN
//! ======
//! Tokens are random 32-byte hex strings mapped to a user id in memory. They
//! expire after the configured TTL; expired entries are dropped lazily on
//! lookup and swept whenever a new session is created.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tokio::sync::RwLock;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, Clone)]
struct SessionEntry {
    user_id: String,
    expires_at: Instant,
}

/// Live session tokens. Clone shares the same table.
#[derive(Debug, Clone)]
pub struct SessionTable {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionTable {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    /// Create a session for `user_id`, returning the token.
    pub async fn create(&self, user_id: &str) -> String {
        let token = generate_token();
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(token.clone(), SessionEntry { user_id: user_id.to_owned(), expires_at: now + self.ttl });
        token
    }

    /// Resolve a token to its user id if it is still valid.
    pub async fn validate(&self, token: &str) -> Option<String> {
        let now = Instant::now();
        {
            let sessions = self.inner.read().await;
            match sessions.get(token) {
                Some(entry) if entry.expires_at > now => return Some(entry.user_id.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.inner.write().await.remove(token);
        None
    }

    /// Delete a session by token.
    pub async fn delete(&self, token: &str) {
        self.inner.write().await.remove(token);
    }

    #[cfg(test)]
    /// Number of stored sessions, expired or not.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
