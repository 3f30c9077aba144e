use serde::{Deserialize, Serialize};

/// Name of the business network deployed automatically on first use.
pub const DEFAULT_NETWORK_NAME: &str = "org.acme.biznet";

/// The deployable unit managed through an admin connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessNetworkDefinition {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl BusinessNetworkDefinition {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }

    /// The versioned identifier, e.g. `org.acme.biznet@0.0.1`.
    pub fn identifier(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// The network deployed to a fresh runtime when none exists yet.
    pub fn default_network() -> Self {
        Self::new(DEFAULT_NETWORK_NAME, "0.0.1", "The default business network")
    }
}
