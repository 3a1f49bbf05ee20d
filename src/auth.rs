//! Bearer-token storage.
//!
//! The surrounding app persists the session token (and redirects to login
//! when it is missing); this core only reads it. A missing token surfaces
//! as [`ApiError::AuthRequired`](crate::api::ApiError::AuthRequired) from
//! whichever call needed it.

use std::sync::{Mutex, PoisonError};

/// Source of the bearer token attached to every collaborator call.
pub trait TokenStore: Send + Sync {
    /// Current session token, if any.
    fn token(&self) -> Option<String>;
}

/// In-memory token holder for app shells and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }

    /// Replace the stored token (login / token refresh).
    pub fn set(&self, token: &str) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    /// Drop the stored token (logout / expiry).
    pub fn clear(&self) {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        assert!(MemoryTokenStore::new().token().is_none());
    }

    #[test]
    fn set_then_clear() {
        let store = MemoryTokenStore::new();
        store.set("abc123");
        assert_eq!(store.token().as_deref(), Some("abc123"));
        store.clear();
        assert!(store.token().is_none());
    }

    #[test]
    fn with_token_constructor() {
        let store = MemoryTokenStore::with_token("tok");
        assert_eq!(store.token().as_deref(), Some("tok"));
    }
}
