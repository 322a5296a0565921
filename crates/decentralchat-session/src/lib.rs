/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public DecentralChat session crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod error;
pub mod provider;
pub mod routing;
pub mod session;
pub mod types;

// Re-export commonly used types from error
pub use error::{Result, SessionError};

// Re-export commonly used types from provider
pub use provider::{
    LocalKeyProvider,
    MockWalletProvider,
    PromptOutcome,
    WalletProvider,
};

// Re-export commonly used types from session
pub use session::{SessionManager, SessionStore, Subscription};

// Re-export commonly used types from routing
pub use routing::{RouteDecision, RouteGuard};

// Re-export all types
pub use types::*;
