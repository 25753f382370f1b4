//! Typed authentication outcomes

use thiserror::Error;

/// Why a presented credential was rejected
///
/// Every rejection is an explicit result; the gate never converts an
/// infrastructure failure into a synthetic identity.
#[derive(Debug, Error)]
pub enum AuthRejection {
    /// No credential presented in either accepted header
    #[error("API key is required")]
    CredentialMissing,

    /// Token unknown to the store, deactivated, or past its expiry
    #[error("Invalid or expired API key")]
    CredentialInvalidOrExpired,

    /// The key store could not be reached; fatal to this request
    #[error("Key store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl AuthRejection {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
        }
    }
}
