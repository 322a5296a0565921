/*
[INPUT]:  Detection, account-listing, and signing requests from the manager
[OUTPUT]: Account addresses and signature strings (or provider errors)
[POS]:    Provider layer - wallet capability abstraction
[UPDATE]: When adding new provider operations or changing the failure contract
*/

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Result, SessionError};

/// Trait boundary to the external wallet capability
///
/// Implement this trait for your wallet source (browser-injected provider
/// bridge, hardware wallet, local key). The trait is async because the
/// prompting operations suspend until the user responds in the wallet's own
/// UI; there are no internal timeouts, and a dismissed prompt must surface
/// as `UserRejected` rather than pending forever.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Whether a signing capability is present. Side-effect-free.
    fn is_available(&self) -> bool;

    /// Accounts already authorized for this origin, without prompting
    ///
    /// Returns an empty vec (not an error) when the capability is present
    /// but nothing is pre-authorized.
    async fn connected_accounts(&self) -> Result<Vec<String>>;

    /// Prompt the user to authorize one account; suspends until they respond
    async fn request_connection(&self) -> Result<String>;

    /// Request a signature over `message` from the given account
    async fn sign_message(&self, address: &str, message: &str) -> Result<String>;
}

/// Scripted outcome for a connection prompt
#[derive(Debug, Clone)]
pub enum PromptOutcome {
    /// The user authorizes the given account
    Accept(String),
    /// The user declines or dismisses the prompt
    Reject,
}

/// Scripted outcome for a signing request
#[derive(Debug, Clone)]
enum SignOutcome {
    Signature(String),
    Rejected,
    Failed(String),
}

struct MockInner {
    available: bool,
    authorized: Vec<String>,
    prompt_script: VecDeque<PromptOutcome>,
    sign_outcome: SignOutcome,
    query_failure: Option<String>,
}

/// Scripted wallet provider for tests and headless runs
///
/// Every operation is counted so callers can assert, for example, that
/// resumption never showed a prompt. An unscripted prompt behaves as a
/// dismissal (`UserRejected`).
pub struct MockWalletProvider {
    inner: Mutex<MockInner>,
    queries: AtomicUsize,
    prompts: AtomicUsize,
    signatures: AtomicUsize,
}

impl MockWalletProvider {
    fn with_inner(inner: MockInner) -> Self {
        Self {
            inner: Mutex::new(inner),
            queries: AtomicUsize::new(0),
            prompts: AtomicUsize::new(0),
            signatures: AtomicUsize::new(0),
        }
    }

    /// Capability absent (no wallet extension installed)
    pub fn unavailable() -> Self {
        Self::with_inner(MockInner {
            available: false,
            authorized: Vec::new(),
            prompt_script: VecDeque::new(),
            sign_outcome: SignOutcome::Signature("0xmock_signature".to_string()),
            query_failure: None,
        })
    }

    /// Capability present, no account pre-authorized
    pub fn available() -> Self {
        let mut provider = Self::unavailable();
        provider.inner.get_mut().unwrap().available = true;
        provider
    }

    /// Capability present with the given accounts pre-authorized
    pub fn with_authorized<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut provider = Self::available();
        provider.inner.get_mut().unwrap().authorized =
            accounts.into_iter().map(Into::into).collect();
        provider
    }

    /// Toggle capability presence
    pub fn set_available(&self, available: bool) {
        self.inner.lock().unwrap().available = available;
    }

    /// Queue the outcome of the next connection prompt
    pub fn push_prompt(&self, outcome: PromptOutcome) {
        self.inner.lock().unwrap().prompt_script.push_back(outcome);
    }

    /// Set the signature returned by subsequent signing requests
    pub fn set_signature(&self, signature: &str) {
        self.inner.lock().unwrap().sign_outcome = SignOutcome::Signature(signature.to_string());
    }

    /// Make subsequent signing requests fail as user rejections
    pub fn reject_signing(&self) {
        self.inner.lock().unwrap().sign_outcome = SignOutcome::Rejected;
    }

    /// Make subsequent signing requests fail with a provider error
    pub fn fail_signing(&self, message: &str) {
        self.inner.lock().unwrap().sign_outcome = SignOutcome::Failed(message.to_string());
    }

    /// Make subsequent account queries fail with a provider error
    pub fn fail_queries(&self, message: &str) {
        self.inner.lock().unwrap().query_failure = Some(message.to_string());
    }

    /// Number of non-prompting account queries performed
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of connection prompts shown
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    /// Number of signing requests received
    pub fn signature_count(&self) -> usize {
        self.signatures.load(Ordering::SeqCst)
    }
}

impl Default for MockWalletProvider {
    fn default() -> Self {
        Self::available()
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn is_available(&self) -> bool {
        self.inner.lock().unwrap().available
    }

    async fn connected_accounts(&self) -> Result<Vec<String>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        if !inner.available {
            return Err(SessionError::ProviderUnavailable);
        }
        if let Some(message) = &inner.query_failure {
            return Err(SessionError::QueryFailed(message.clone()));
        }
        Ok(inner.authorized.clone())
    }

    async fn request_connection(&self) -> Result<String> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock().unwrap();
        if !inner.available {
            return Err(SessionError::ProviderUnavailable);
        }
        match inner.prompt_script.pop_front() {
            Some(PromptOutcome::Accept(address)) => {
                // An accepted prompt authorizes the account for later queries
                if !inner.authorized.contains(&address) {
                    inner.authorized.push(address.clone());
                }
                Ok(address)
            }
            Some(PromptOutcome::Reject) | None => Err(SessionError::UserRejected),
        }
    }

    async fn sign_message(&self, _address: &str, _message: &str) -> Result<String> {
        self.signatures.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.lock().unwrap();
        if !inner.available {
            return Err(SessionError::ProviderUnavailable);
        }
        match &inner.sign_outcome {
            SignOutcome::Signature(signature) => Ok(signature.clone()),
            SignOutcome::Rejected => Err(SessionError::UserRejected),
            SignOutcome::Failed(message) => Err(SessionError::SigningFailed(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_provider_fails_queries() {
        let provider = MockWalletProvider::unavailable();
        assert!(!provider.is_available());

        let err = provider.connected_accounts().await.unwrap_err();
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn test_empty_authorization_is_not_an_error() {
        let provider = MockWalletProvider::available();
        let accounts = provider.connected_accounts().await.unwrap();
        assert!(accounts.is_empty());
        assert_eq!(provider.query_count(), 1);
    }

    #[tokio::test]
    async fn test_accepted_prompt_authorizes_account() {
        let provider = MockWalletProvider::available();
        provider.push_prompt(PromptOutcome::Accept("0xABC".to_string()));

        let address = provider.request_connection().await.unwrap();
        assert_eq!(address, "0xABC");
        assert_eq!(provider.prompt_count(), 1);

        // The account now shows up in the non-prompting query
        let accounts = provider.connected_accounts().await.unwrap();
        assert_eq!(accounts, vec!["0xABC".to_string()]);
    }

    #[tokio::test]
    async fn test_unscripted_prompt_is_a_dismissal() {
        let provider = MockWalletProvider::available();
        let err = provider.request_connection().await.unwrap_err();
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn test_sign_outcomes() {
        let provider = MockWalletProvider::with_authorized(["0xABC"]);
        let signature = provider.sign_message("0xABC", "hello").await.unwrap();
        assert_eq!(signature, "0xmock_signature");

        provider.reject_signing();
        let err = provider.sign_message("0xABC", "hello").await.unwrap_err();
        assert!(err.is_rejection());

        provider.fail_signing("ledger locked");
        match provider.sign_message("0xABC", "hello").await.unwrap_err() {
            SessionError::SigningFailed(msg) => assert_eq!(msg, "ledger locked"),
            other => panic!("unexpected error variant: {other:?}"),
        }
        assert_eq!(provider.signature_count(), 3);
    }
}
