use serde::{Deserialize, Serialize};

/// A user-named connection profile.
///
/// The enum is `#[serde(tag = "kind")]` so JSON looks like:
/// `{ "name":"web", "kind":"Web" }` or
/// `{ "name":"hlfv1", "kind":"Fabric", "peer_url":"grpc://localhost:7051", ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ConnectionProfile {
    /// The in-process embedded runtime.
    Web { name: String },
    /// A Hyperledger Fabric network.
    Fabric {
        name: String,
        membership_services_url: String,
        peer_url: String,
        event_hub_url: String,
        key_val_store: String,
        deploy_wait_time: u32,
        invoke_wait_time: u32,
    },
}

impl ConnectionProfile {
    /// Returns the unique, human-readable identifier.
    pub fn name(&self) -> &str {
        match self {
            ConnectionProfile::Web { name } => name,
            ConnectionProfile::Fabric { name, .. } => name,
        }
    }
}
