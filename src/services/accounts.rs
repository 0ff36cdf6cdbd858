//! In-memory account directory.
//!
//! Accounts are keyed by user id with a secondary index on normalized email.
//! Passwords are stored as salted SHA-256 digests; nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use session::user::name_from_email;
use session::{Credentials, Registration, Role, UserPatch, UserRecord};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use super::sessions::bytes_to_hex;

const SALT_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("account not found: {0}")]
    NotFound(String),
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

#[must_use]
pub fn generate_salt() -> String {
    let bytes: [u8; SALT_LEN] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

#[derive(Debug, Clone)]
struct Account {
    user: UserRecord,
    salt: String,
    password_hash: String,
}

impl Account {
    fn new(user: UserRecord, password: &str) -> Self {
        let salt = generate_salt();
        let password_hash = hash_password(&salt, password);
        Self { user, salt, password_hash }
    }

    fn password_matches(&self, password: &str) -> bool {
        hash_password(&self.salt, password) == self.password_hash
    }
}

#[derive(Debug, Default)]
struct Directory {
    by_id: HashMap<String, Account>,
    /// normalized email -> user id
    by_email: HashMap<String, String>,
}

impl Directory {
    fn insert(&mut self, email: String, account: Account) -> UserRecord {
        let user = account.user.clone();
        self.by_email.insert(email, user.id.clone());
        self.by_id.insert(user.id.clone(), account);
        user
    }

    fn find_by_email(&self, email: &str) -> Option<&Account> {
        self.by_email.get(email).and_then(|id| self.by_id.get(id))
    }
}

/// Shared account directory. Clone shares the same accounts.
#[derive(Debug, Clone)]
pub struct AccountDirectory {
    inner: Arc<RwLock<Directory>>,
    auto_provision: bool,
}

impl AccountDirectory {
    /// `auto_provision` lets unknown emails log in, creating an account with
    /// the demo role heuristic.
    #[must_use]
    pub fn new(auto_provision: bool) -> Self {
        Self { inner: Arc::new(RwLock::new(Directory::default())), auto_provision }
    }

    pub async fn register(&self, registration: &Registration) -> Result<UserRecord, AccountError> {
        let (key, email) = required_email(&registration.email)?;
        if registration.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }
        let name = registration.display_name.trim();
        if name.is_empty() {
            return Err(AccountError::MissingField("name"));
        }

        let mut dir = self.inner.write().await;
        if dir.by_email.contains_key(&key) {
            return Err(AccountError::EmailTaken);
        }
        let user = UserRecord::new(email, name, registration.role);
        let account = Account::new(user, &registration.password);
        Ok(dir.insert(key, account))
    }

    pub async fn authenticate(&self, credentials: &Credentials) -> Result<UserRecord, AccountError> {
        let (key, email) = required_email(&credentials.email)?;
        if credentials.password.is_empty() {
            return Err(AccountError::MissingField("password"));
        }

        {
            let dir = self.inner.read().await;
            if let Some(account) = dir.find_by_email(&key) {
                if account.password_matches(&credentials.password) {
                    return Ok(account.user.clone());
                }
                return Err(AccountError::InvalidCredentials);
            }
        }

        if !self.auto_provision {
            return Err(AccountError::InvalidCredentials);
        }

        let mut dir = self.inner.write().await;
        // Another request may have provisioned the same email meanwhile.
        if let Some(account) = dir.find_by_email(&key) {
            return if account.password_matches(&credentials.password) {
                Ok(account.user.clone())
            } else {
                Err(AccountError::InvalidCredentials)
            };
        }
        tracing::info!(%email, "provisioning demo account");
        let role = Role::guess_from_email(&email);
        let name = name_from_email(&email);
        let user = UserRecord::new(email, name, role);
        let account = Account::new(user, &credentials.password);
        Ok(dir.insert(key, account))
    }

    pub async fn get(&self, user_id: &str) -> Option<UserRecord> {
        self.inner.read().await.by_id.get(user_id).map(|a| a.user.clone())
    }

    /// Apply `patch` to the account and bump its `updated_at`.
    pub async fn update(&self, user_id: &str, patch: &UserPatch) -> Result<UserRecord, AccountError> {
        let new_email = patch.email.as_deref().map(required_email).transpose()?;
        let new_name = match patch.display_name.as_deref().map(str::trim) {
            Some("") => return Err(AccountError::MissingField("name")),
            other => other.map(str::to_owned),
        };

        let mut dir = self.inner.write().await;
        let Directory { by_id, by_email } = &mut *dir;
        let account = by_id.get_mut(user_id).ok_or_else(|| AccountError::NotFound(user_id.to_owned()))?;

        let new_email = match new_email {
            Some((key, email)) => {
                if by_email.get(&key).is_some_and(|owner| owner != user_id) {
                    return Err(AccountError::EmailTaken);
                }
                let old_key = normalize_email(&account.user.email).unwrap_or_else(|| account.user.email.clone());
                by_email.remove(&old_key);
                by_email.insert(key, user_id.to_owned());
                Some(email)
            }
            None => None,
        };

        account.user.apply(&UserPatch { display_name: new_name, email: new_email });
        Ok(account.user.clone())
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_id.len()
    }
}

/// Validate an entered email. Returns the lookup key (normalized) and the
/// email as entered, trimmed, which is what the user record keeps.
fn required_email(raw: &str) -> Result<(String, String), AccountError> {
    let entered = raw.trim();
    if entered.is_empty() {
        return Err(AccountError::MissingField("email"));
    }
    let key = normalize_email(entered).ok_or(AccountError::InvalidEmail)?;
    Ok((key, entered.to_owned()))
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
