//! A deterministic **in-process stand-in** for any type that implements
//! `biznet_admin::connections::connection::AdminConnection`.
//!
//! *  **From the test's perspective**
//!    * Configure behaviour up front through the shared [`FakeState`]
//!      (networks returned by `list`, how many connect calls should fail,
//!      an artificial connect delay).
//!    * Inspect everything the service did afterwards via the recorded
//!      `connect_calls`, `deployed`, `updated` and `disconnects`.
//!
//! *  **Why this exists**: It lets integration tests exercise the *real*
//!    connect/fallback/deploy machinery without a business-network runtime.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use biznet_admin::connections::connection::AdminConnection;
use biznet_admin::connections::errors::ConnectionError;
use biznet_admin::core::business_network::BusinessNetworkDefinition;

/// One recorded call to `connect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectCall {
    pub profile: String,
    pub user_id: String,
    pub user_secret: String,
    pub business_network: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeState {
    /// Every `connect` call the service made, kept for assertions.
    pub connect_calls: Vec<ConnectCall>,
    /// Definitions handed to `deploy`.
    pub deployed: Vec<BusinessNetworkDefinition>,
    /// Definitions handed to `update`.
    pub updated: Vec<BusinessNetworkDefinition>,
    pub disconnects: usize,

    /// What `list` should answer.
    pub listed_networks: Vec<String>,
    /// Fail this many `connect` calls before letting one succeed.
    pub connect_failures: u32,
    /// Sleep this long inside every `connect`, to widen the window in which
    /// other callers can join an in-flight attempt.
    pub connect_delay: Duration,
}

pub struct FakeAdminConnection {
    state: Arc<Mutex<FakeState>>,
}

impl FakeAdminConnection {
    /// Create a new fake plus the shared state handle the test keeps.
    pub fn new() -> (Self, Arc<Mutex<FakeState>>) {
        let state = Arc::new(Mutex::new(FakeState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

#[async_trait]
impl AdminConnection for FakeAdminConnection {
    async fn connect(
        &mut self,
        profile: &str,
        user_id: &str,
        user_secret: &str,
        business_network: Option<&str>,
    ) -> Result<(), ConnectionError> {
        let delay = self.state.lock().unwrap().connect_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().unwrap();
        state.connect_calls.push(ConnectCall {
            profile: profile.to_string(),
            user_id: user_id.to_string(),
            user_secret: user_secret.to_string(),
            business_network: business_network.map(str::to_string),
        });
        if state.connect_failures > 0 {
            state.connect_failures -= 1;
            return Err(ConnectionError::Other("simulated connect failure".into()));
        }
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), ConnectionError> {
        self.state.lock().unwrap().disconnects += 1;
        Ok(())
    }

    async fn deploy(
        &mut self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError> {
        self.state.lock().unwrap().deployed.push(definition.clone());
        Ok(())
    }

    async fn update(
        &mut self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError> {
        self.state.lock().unwrap().updated.push(definition.clone());
        Ok(())
    }

    async fn list(&mut self) -> Result<Vec<String>, ConnectionError> {
        Ok(self.state.lock().unwrap().listed_networks.clone())
    }
}
