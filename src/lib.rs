pub mod connections;
pub mod core;
pub mod identity;
pub mod storage;
pub mod utils;

// re-export ergonomic entry points
pub use crate::core::admin_service::AdminService;
pub use crate::core::alerts::AlertService;
pub use crate::core::business_network::BusinessNetworkDefinition;
