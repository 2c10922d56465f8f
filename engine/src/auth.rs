//! Shared-secret login gate.
//!
//! Not an auth system: one static password, and a flag in the client's store
//! remembering that it was entered.

use thiserror::Error;

use gameday_store::{KeyValueStore, StoreError};

pub const LOGGED_IN_KEY: &str = "isLoggedIn";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct PasswordGate {
    password: String,
}

impl std::fmt::Debug for PasswordGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordGate")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl PasswordGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn login(&self, store: &mut impl KeyValueStore, attempt: &str) -> Result<(), AuthError> {
        if attempt != self.password {
            tracing::info!("Rejected login attempt");
            return Err(AuthError::IncorrectPassword);
        }
        store.set(LOGGED_IN_KEY, "true")?;
        tracing::info!("Logged in");
        Ok(())
    }

    pub fn logout(&self, store: &mut impl KeyValueStore) -> Result<(), AuthError> {
        store.remove(LOGGED_IN_KEY)?;
        tracing::info!("Logged out");
        Ok(())
    }

    #[must_use]
    pub fn is_logged_in(&self, store: &impl KeyValueStore) -> bool {
        store.get(LOGGED_IN_KEY).as_deref() == Some("true")
    }
}
