/*
[INPUT]:  Wallet provider boundary and user-triggered lifecycle actions
[OUTPUT]: Session transitions written to the store, signatures, auth errors
[POS]:    Session layer - orchestrates the connect/disconnect/resume/sign flow
[UPDATE]: When lifecycle semantics or the operation-serialization policy change
*/

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};
use crate::provider::WalletProvider;
use crate::routing::RouteGuard;
use crate::session::SessionStore;
use crate::types::{Session, SessionConfig};

/// Orchestrates the wallet session lifecycle
///
/// One manager instance per process, constructed at application start and
/// passed down to whatever needs it. The suspending operations (`resume`,
/// `connect`, `sign`) are serialized through a single in-flight guard, so a
/// second `connect()` issued while one prompt is pending queues behind it
/// instead of racing two prompts, and resumption always settles before a
/// queued `connect()` runs.
pub struct SessionManager {
    provider: Arc<dyn WalletProvider>,
    store: SessionStore,
    config: SessionConfig,
    op_guard: Mutex<()>,
}

impl SessionManager {
    /// Create a manager with the default configuration
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self::with_config(provider, SessionConfig::default())
    }

    /// Create a manager with an explicit configuration
    pub fn with_config(provider: Arc<dyn WalletProvider>, config: SessionConfig) -> Self {
        Self {
            provider,
            store: SessionStore::new(),
            config,
            op_guard: Mutex::new(()),
        }
    }

    /// Handle to the session state store
    pub fn store(&self) -> SessionStore {
        self.store.clone()
    }

    /// The manager configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Route guard wired to this manager's store and login route
    pub fn route_guard(&self) -> RouteGuard {
        RouteGuard::new(self.store.clone(), self.config.login_route.clone())
    }

    /// Recover a previously authorized session at startup
    ///
    /// Uses only the non-prompting account query; the first reported account
    /// becomes the session. Every failure is absorbed and logged, and the
    /// store settles unauthenticated. Runs at most once: later calls return
    /// without querying once the store has left its loading state.
    pub async fn resume(&self) {
        let _op = self.op_guard.lock().await;

        if !self.store.state().loading {
            debug!("resume skipped, session state already settled");
            return;
        }

        if !self.provider.is_available() {
            info!("no wallet provider detected, starting unauthenticated");
            self.store.set_unauthenticated();
            return;
        }

        match self.provider.connected_accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(address) => {
                    info!(%address, "resumed wallet session");
                    self.store.set_authenticated(Session::new(address));
                }
                None => {
                    debug!("no pre-authorized account, starting unauthenticated");
                    self.store.set_unauthenticated();
                }
            },
            Err(err) => {
                warn!(error = %err, "session resumption failed, starting unauthenticated");
                self.store.set_unauthenticated();
            }
        }
    }

    /// Prompt the user to authorize an account and establish a session
    ///
    /// On failure the store is left unchanged and the error carries a
    /// user-presentable reason. Calling this while already authenticated
    /// re-prompts and replaces the session with whatever account the user
    /// authorizes.
    pub async fn connect(&self) -> Result<Session> {
        let _op = self.op_guard.lock().await;

        if !self.provider.is_available() {
            return Err(SessionError::ProviderUnavailable);
        }

        let address = self.provider.request_connection().await?;
        let session = Session::new(address);
        info!(address = %session.address, "wallet connected");
        self.store.set_authenticated(session.clone());
        Ok(session)
    }

    /// Clear the session
    ///
    /// Local-only and unconditional: the provider is not asked to revoke its
    /// authorization, and calling this while already unauthenticated is a
    /// no-op.
    pub fn disconnect(&self) {
        if self.store.state().is_authenticated() {
            info!("wallet disconnected");
        }
        self.store.set_unauthenticated();
    }

    /// Request a signature over `message` from the current session's account
    ///
    /// Fails with `NotAuthenticated` before touching the provider when no
    /// session is present. Provider failures propagate to the caller
    /// unchanged; each call is a single attempt.
    pub async fn sign(&self, message: &str) -> Result<String> {
        let _op = self.op_guard.lock().await;

        let state = self.store.state();
        let session = state.session.as_ref().ok_or(SessionError::NotAuthenticated)?;

        debug!(address = %session.address, "requesting message signature");
        self.provider.sign_message(&session.address, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockWalletProvider, PromptOutcome};

    #[tokio::test]
    async fn test_resume_recovers_preauthorized_account() {
        let provider = Arc::new(MockWalletProvider::with_authorized(["0xABC"]));
        let manager = SessionManager::new(provider.clone());

        manager.resume().await;

        let state = manager.store().state();
        assert!(!state.loading);
        assert_eq!(state.address(), Some("0xABC"));
        assert_eq!(provider.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_resume_runs_at_most_once() {
        let provider = Arc::new(MockWalletProvider::available());
        let manager = SessionManager::new(provider.clone());

        manager.resume().await;
        manager.resume().await;

        assert_eq!(provider.query_count(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_leaves_store_unchanged() {
        let provider = Arc::new(MockWalletProvider::available());
        let manager = SessionManager::new(provider.clone());
        manager.resume().await;

        // Unscripted prompt behaves as a dismissal
        let err = manager.connect().await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(manager.store().state(), crate::types::SessionState::unauthenticated());
    }

    #[tokio::test]
    async fn test_sign_without_session_skips_provider() {
        let provider = Arc::new(MockWalletProvider::available());
        let manager = SessionManager::new(provider.clone());
        manager.resume().await;

        match manager.sign("hello").await.unwrap_err() {
            SessionError::NotAuthenticated => {}
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert_eq!(provider.signature_count(), 0);
    }

    #[tokio::test]
    async fn test_connect_then_sign_round_trip() {
        let provider = Arc::new(MockWalletProvider::available());
        provider.push_prompt(PromptOutcome::Accept("0xABC".to_string()));
        provider.set_signature("0xdeadbeef");
        let manager = SessionManager::new(provider.clone());
        manager.resume().await;

        let session = manager.connect().await.unwrap();
        assert_eq!(session.address, "0xABC");

        let signature = manager.sign("hello").await.unwrap();
        assert_eq!(signature, "0xdeadbeef");
    }
}
