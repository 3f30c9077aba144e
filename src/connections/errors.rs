use std::fmt::{self, Display};

/// A central error enum for admin-connection related errors.
#[derive(Debug)]
pub enum ConnectionError {
    IoError(std::io::Error),
    ProfileError(String),
    IdentityError(String),
    NotConnected,
    Other(String),
}

/// Convert from std::io::Error.
impl From<std::io::Error> for ConnectionError {
    fn from(err: std::io::Error) -> ConnectionError {
        ConnectionError::IoError(err)
    }
}

/// Convert from serde_json::Error.
/// Profile files are JSON, so decode failures surface as profile errors.
impl From<serde_json::Error> for ConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ConnectionError::ProfileError(err.to_string())
    }
}

/// Convert from keyring::Error.
/// Without this, `?` won't work on keyring lookups in the identity service.
impl From<keyring::Error> for ConnectionError {
    fn from(err: keyring::Error) -> Self {
        ConnectionError::IdentityError(err.to_string())
    }
}

impl Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::IoError(e) => write!(f, "IO error: {}", e),
            ConnectionError::ProfileError(msg) => write!(f, "Profile error: {}", msg),
            ConnectionError::IdentityError(msg) => write!(f, "Identity error: {}", msg),
            ConnectionError::NotConnected => {
                write!(f, "Not connected to a business network runtime")
            }
            ConnectionError::Other(msg) => write!(f, "Other error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectionError {}
