pub mod admin_service;
pub mod alerts;
pub mod business_network;

// Re-export the modules here for easy import elsewhere.
pub use admin_service::*;
pub use alerts::*;
pub use business_network::*;
