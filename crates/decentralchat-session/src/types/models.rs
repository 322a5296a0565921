/*
[INPUT]:  Account identifiers reported by the wallet provider
[OUTPUT]: Session record and lifecycle snapshot types
[POS]:    Data layer - the authenticated-identity model
[UPDATE]: When session fields or lifecycle semantics change
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated-identity record
///
/// Created whole from a successful provider query or connect, cleared whole
/// on disconnect. The address is kept exactly as the provider reported it;
/// no case normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Externally-owned account identifier as reported by the provider
    pub address: String,
    /// When this session was established (resumption or explicit connect)
    pub connected_at: DateTime<Utc>,
}

impl Session {
    /// Create a session for the given account, stamped with the current time
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            connected_at: Utc::now(),
        }
    }
}

/// Snapshot of the session lifecycle
///
/// `loading` is true only while startup resumption is outstanding; it never
/// re-enters true once settled. Authentication status is derived from the
/// presence of the session record, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// True while the startup-resumption query is outstanding
    pub loading: bool,
    /// The current session, if any
    pub session: Option<Session>,
}

impl SessionState {
    /// State before startup resumption has settled
    pub fn initializing() -> Self {
        Self {
            loading: true,
            session: None,
        }
    }

    /// Settled state with an authenticated session
    pub fn authenticated(session: Session) -> Self {
        Self {
            loading: false,
            session: Some(session),
        }
    }

    /// Settled state without a session
    pub fn unauthenticated() -> Self {
        Self {
            loading: false,
            session: None,
        }
    }

    /// Whether an authenticated session is present
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The authenticated account address, if any
    pub fn address(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.address.as_str())
    }
}

/// Session-layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Route the guard redirects unauthenticated navigation to
    pub login_route: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_route: "/login".to_string(),
        }
    }
}
