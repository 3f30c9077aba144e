use async_trait::async_trait;

use super::errors::ConnectionError;
use crate::core::business_network::BusinessNetworkDefinition;

/// A trait representing a connection to a business-network runtime
/// (embedded, Fabric, etc.).
///
/// `connect` with `business_network: None` attaches to the runtime itself,
/// which is enough to list and deploy networks. Passing a network identifier
/// connects to that specific deployed network.
#[async_trait]
pub trait AdminConnection {
    async fn connect(
        &mut self,
        profile: &str,
        user_id: &str,
        user_secret: &str,
        business_network: Option<&str>,
    ) -> Result<(), ConnectionError>;

    async fn disconnect(&mut self) -> Result<(), ConnectionError>;

    async fn deploy(
        &mut self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError>;

    async fn update(
        &mut self,
        definition: &BusinessNetworkDefinition,
    ) -> Result<(), ConnectionError>;

    /// Names of every business network deployed to the runtime.
    async fn list(&mut self) -> Result<Vec<String>, ConnectionError>;
}
