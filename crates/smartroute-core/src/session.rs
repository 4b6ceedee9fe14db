//! Session credential storage.
//!
//! The session credential is an opaque token issued by the backend at login.
//! Its presence is the sole authentication signal; there is no client-side
//! expiry check. A revoked token is only discovered when a gateway call fails
//! with an [`crate::ApiError::Auth`] error.

use crate::secret_store::{self, SecretStoreError};

const SESSION_LABEL: &str = "session_token";

/// Opaque bearer credential identifying an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Durable storage for the session credential.
///
/// The store is an explicit, injected collaborator rather than ambient global
/// state: the controller reads it once at startup and owns the handle for the
/// life of the process, and tests substitute [`MemoryStore`].
pub trait CredentialStore: Send {
    fn load(&self) -> Result<Option<Credential>, SecretStoreError>;
    fn store(&mut self, credential: &Credential) -> Result<(), SecretStoreError>;
    fn clear(&mut self) -> Result<(), SecretStoreError>;
}

/// Production store backed by the OS keyring with an encrypted file fallback.
#[derive(Debug, Default)]
pub struct KeyringStore;

impl CredentialStore for KeyringStore {
    fn load(&self) -> Result<Option<Credential>, SecretStoreError> {
        Ok(secret_store::load_secret(SESSION_LABEL)?.map(Credential::new))
    }

    fn store(&mut self, credential: &Credential) -> Result<(), SecretStoreError> {
        secret_store::store_secret(SESSION_LABEL, credential.as_str())
    }

    fn clear(&mut self) -> Result<(), SecretStoreError> {
        secret_store::delete_secret(SESSION_LABEL)
    }
}

/// In-memory store for tests and headless runs. Never touches the keyring.
#[derive(Debug, Default)]
pub struct MemoryStore {
    credential: Option<Credential>,
}

impl MemoryStore {
    pub fn with_credential(token: &str) -> Self {
        Self {
            credential: Some(Credential::new(token)),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<Credential>, SecretStoreError> {
        Ok(self.credential.clone())
    }

    fn store(&mut self, credential: &Credential) -> Result<(), SecretStoreError> {
        self.credential = Some(credential.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SecretStoreError> {
        self.credential = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_one_credential() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load().unwrap(), None);

        store.store(&Credential::new("abc123")).unwrap();
        assert_eq!(store.load().unwrap(), Some(Credential::new("abc123")));

        // Storing again replaces; at most one credential exists at a time.
        store.store(&Credential::new("def456")).unwrap();
        assert_eq!(store.load().unwrap(), Some(Credential::new("def456")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
