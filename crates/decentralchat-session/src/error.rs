/*
[INPUT]:  Error sources (wallet provider, session lifecycle, configuration)
[OUTPUT]: Structured error types with user-presentable messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the session crate
///
/// Messages are written to be shown to the user as-is: the login screen
/// renders a failed `connect()` reason inline without further mapping.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No wallet capability is present in the execution environment
    #[error("no wallet provider detected, please install a wallet extension")]
    ProviderUnavailable,

    /// The user declined or dismissed a prompt in the wallet UI
    #[error("request was rejected in the wallet")]
    UserRejected,

    /// The provider reported a signing-specific failure
    #[error("message signing failed: {0}")]
    SigningFailed(String),

    /// A non-prompting account query failed for an unspecified reason
    #[error("wallet account query failed: {0}")]
    QueryFailed(String),

    /// An operation that requires a session was called without one
    #[error("no wallet is connected")]
    NotAuthenticated,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl SessionError {
    /// Check if the error is a user rejection (retry makes sense)
    pub fn is_rejection(&self) -> bool {
        matches!(self, SessionError::UserRejected)
    }

    /// Check if the error indicates a missing wallet capability
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SessionError::ProviderUnavailable)
    }

    /// Create an error from a raw EIP-1193 provider error code
    ///
    /// 4001 is the user-rejection code; 4100/4900/4901 cover unauthorized
    /// and disconnected providers. Anything else is reported as a signing
    /// failure with the provider's own message attached.
    pub fn provider_error(code: i64, message: impl Into<String>) -> Self {
        match code {
            4001 => SessionError::UserRejected,
            4100 | 4900 | 4901 => SessionError::ProviderUnavailable,
            _ => SessionError::SigningFailed(format!("provider error {code}: {}", message.into())),
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
