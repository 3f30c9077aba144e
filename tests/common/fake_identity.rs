//! Scriptable identity double: fixed credentials, an optional failure when
//! the secret is requested, and an optional delay so tests can hold a
//! connect attempt open while other callers pile in.

use std::time::Duration;

use async_trait::async_trait;
use biznet_admin::connections::errors::ConnectionError;
use biznet_admin::identity::IdentityService;

pub struct FakeIdentityService {
    user_id: String,
    user_secret: String,
    fail_secret: bool,
    delay: Duration,
}

impl FakeIdentityService {
    pub fn new(user_id: impl Into<String>, user_secret: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_secret: user_secret.into(),
            fail_secret: false,
            delay: Duration::ZERO,
        }
    }

    /// Make every `user_secret` call fail.
    pub fn failing_secret(mut self) -> Self {
        self.fail_secret = true;
        self
    }

    /// Sleep before answering `user_secret`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl IdentityService for FakeIdentityService {
    async fn user_id(&self) -> Result<String, ConnectionError> {
        Ok(self.user_id.clone())
    }

    async fn user_secret(&self) -> Result<String, ConnectionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_secret {
            return Err(ConnectionError::IdentityError(
                "simulated identity failure".into(),
            ));
        }
        Ok(self.user_secret.clone())
    }
}
