use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, info};

use crate::connections::connection::AdminConnection;
use crate::connections::errors::ConnectionError;
use crate::core::business_network::BusinessNetworkDefinition;

struct EmbeddedSession {
    profile: String,
    user_id: String,
    business_network: Option<String>,
}

/// In-process connector that keeps deployed business networks in memory.
///
/// The runtime state lives in the connection value itself, so a
/// disconnect/reconnect cycle against the same instance still sees the
/// networks deployed earlier. Useful as a default connector for local
/// development and as the backend for integration tests.
pub struct EmbeddedAdminConnection {
    deployed: HashMap<String, BusinessNetworkDefinition>,
    session: Option<EmbeddedSession>,
}

impl Default for EmbeddedAdminConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddedAdminConnection {
    pub fn new() -> Self {
        Self {
            deployed: HashMap::new(),
            session: None,
        }
    }

    fn require_session(&self) -> Result<&EmbeddedSession, ConnectionError> {
        self.session.as_ref().ok_or(ConnectionError::NotConnected)
    }
}

#[async_trait]
impl AdminConnection for EmbeddedAdminConnection {
    async fn connect(
        &mut self,
        profile: &str,
        user_id: &str,
        _user_secret: &str,
        business_network: Option<&str>,
    ) -> Result<(), ConnectionError> {
        if let Some(network) = business_network {
            if !self.deployed.contains_key(network) {
                return Err(ConnectionError::Other(format!(
                    "business network '{}' is not deployed",
                    network
                )));
            }
        }

        // Connecting again simply replaces any previous session.
        info!(
            "Embedded runtime: '{}' connected via profile '{}' (network: {:?})",
            user_id, profile, business_network
        );
        self.session = Some(EmbeddedSession {
            profile: profile.to_string(),
            user_id: user_id.to_string(),
            business_network: business_network.map(str::to_string),
        });
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), ConnectionError> {
        if let Some(session) = self.session.take() {
            info!(
                "Embedded runtime: '{}' disconnected from profile '{}'",
                session.user_id, session.profile
            );
        }
        Ok(())
    }

    async fn deploy(
        &mut self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError> {
        self.require_session()?;
        if self.deployed.contains_key(&definition.name) {
            return Err(ConnectionError::Other(format!(
                "business network '{}' is already deployed",
                definition.name
            )));
        }
        info!("Embedded runtime: deployed '{}'", definition.identifier());
        self.deployed
            .insert(definition.name.clone(), definition.clone());
        Ok(())
    }

    async fn update(
        &mut self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError> {
        self.require_session()?;
        match self.deployed.get_mut(&definition.name) {
            Some(existing) => {
                debug!(
                    "Embedded runtime: updating '{}' -> '{}'",
                    existing.identifier(),
                    definition.identifier()
                );
                *existing = definition.clone();
                Ok(())
            }
            None => Err(ConnectionError::Other(format!(
                "business network '{}' is not deployed",
                definition.name
            ))),
        }
    }

    async fn list(&mut self) -> Result<Vec<String>, ConnectionError> {
        let session = self.require_session()?;
        debug!(
            "Embedded runtime: '{}' listing deployed networks (connected to {:?})",
            session.user_id, session.business_network
        );
        let mut names: Vec<String> = self.deployed.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
