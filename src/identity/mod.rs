use async_trait::async_trait;
use keyring::Entry;
use log::debug;

use crate::connections::errors::ConnectionError;

/// Source of the credentials used to open an admin connection.
///
/// The service only ever asks for the current user id and its enrolment
/// secret; how those are managed (OS keyring, wallet, test fixture) is up to
/// the implementation.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn user_id(&self) -> Result<String, ConnectionError>;
    async fn user_secret(&self) -> Result<String, ConnectionError>;
}

/// Identity whose enrolment secret lives in the OS keyring, so it never
/// touches disk in plain text.
pub struct KeyringIdentityService {
    service: String,
    user_id: String,
}

impl KeyringIdentityService {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            service: "biznet_admin".to_string(),
            user_id: user_id.into(),
        }
    }

    fn entry(&self) -> Result<Entry, ConnectionError> {
        Entry::new(&self.service, &self.user_id).map_err(ConnectionError::from)
    }

    /// Create or overwrite the stored enrolment secret.
    pub fn store_secret(&self, secret: &str) -> Result<(), ConnectionError> {
        debug!("Storing enrolment secret for '{}'", self.user_id);
        self.entry()?.set_password(secret)?;
        Ok(())
    }

    /// Remove the stored secret (`Ok(true)` if removed, `Ok(false)` if there
    /// was none).
    pub fn clear_secret(&self) -> Result<bool, ConnectionError> {
        match self.entry()?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl IdentityService for KeyringIdentityService {
    async fn user_id(&self) -> Result<String, ConnectionError> {
        Ok(self.user_id.clone())
    }

    async fn user_secret(&self) -> Result<String, ConnectionError> {
        Ok(self.entry()?.get_password()?)
    }
}

/// Fixed in-memory identity, mainly for the embedded connector and tests.
#[derive(Debug, Clone)]
pub struct StaticIdentityService {
    user_id: String,
    user_secret: String,
}

impl StaticIdentityService {
    pub fn new(user_id: impl Into<String>, user_secret: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_secret: user_secret.into(),
        }
    }
}

#[async_trait]
impl IdentityService for StaticIdentityService {
    async fn user_id(&self) -> Result<String, ConnectionError> {
        Ok(self.user_id.clone())
    }

    async fn user_secret(&self) -> Result<String, ConnectionError> {
        Ok(self.user_secret.clone())
    }
}
