//! Authentication context.
//!
//! [`AuthContext`] is the single owner of the bearer token. It is initialized
//! from persistent storage at startup and writes through to storage on
//! login and logout; nothing else reads or writes the stored token.

use crate::storage::{get_local_storage, remove_local_storage, set_local_storage};

/// Process-wide authentication state.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Storage key holding the persisted token
    storage_key: String,
    token: Option<String>,
}

impl AuthContext {
    /// Restore the context from persistent storage.
    pub fn load(storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();
        let token = get_local_storage(&storage_key).filter(|t| !t.is_empty());
        if token.is_some() {
            tracing::info!("Restored authentication token from storage");
        }
        Self { storage_key, token }
    }

    /// Current token, if logged in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Store a freshly issued token in memory and in persistent storage.
    pub fn login(&mut self, token: String) {
        set_local_storage(&self.storage_key, &token);
        self.token = Some(token);
        tracing::info!("Logged in");
    }

    /// Forget the token everywhere.
    pub fn logout(&mut self) {
        remove_local_storage(&self.storage_key);
        self.token = None;
        tracing::info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_logged_out_without_stored_token() {
        let auth = AuthContext::load("auth_test_empty");
        assert!(!auth.is_authenticated());
        assert_eq!(auth.token(), None);
    }

    #[test]
    fn test_login_persists_token() {
        let key = "auth_test_login";
        let mut auth = AuthContext::load(key);
        auth.login("jwt-123".to_string());

        assert_eq!(auth.token(), Some("jwt-123"));
        assert_eq!(get_local_storage(key).as_deref(), Some("jwt-123"));

        // A fresh context (next startup) sees the same token
        let restored = AuthContext::load(key);
        assert_eq!(restored.token(), Some("jwt-123"));
    }

    #[test]
    fn test_logout_clears_storage() {
        let key = "auth_test_logout";
        let mut auth = AuthContext::load(key);
        auth.login("jwt-456".to_string());
        auth.logout();

        assert!(!auth.is_authenticated());
        assert_eq!(get_local_storage(key), None);
        assert!(!AuthContext::load(key).is_authenticated());
    }

    #[test]
    fn test_empty_stored_token_is_ignored() {
        let key = "auth_test_blank";
        set_local_storage(key, "");
        assert!(!AuthContext::load(key).is_authenticated());
    }
}
