/*
[INPUT]:  Test configuration and provider scripting requirements
[OUTPUT]: Shared test utilities, fixtures, and provider wrappers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for decentralchat-session tests

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use decentralchat_session::{MockWalletProvider, PromptOutcome, Result, WalletProvider};

/// Provider with one pre-authorized account (resumption succeeds silently)
#[allow(dead_code)]
pub fn preauthorized_provider(address: &str) -> Arc<MockWalletProvider> {
    Arc::new(MockWalletProvider::with_authorized([address]))
}

/// Provider with nothing authorized whose next prompt accepts `address`
#[allow(dead_code)]
pub fn accepting_provider(address: &str) -> Arc<MockWalletProvider> {
    let provider = MockWalletProvider::available();
    provider.push_prompt(PromptOutcome::Accept(address.to_string()));
    Arc::new(provider)
}

/// Wrapper whose account query blocks until released, recording call order
///
/// Lets a test hold a resumption mid-flight while issuing other manager
/// operations, then assert what reached the provider and in which order.
#[allow(dead_code)]
pub struct GatedProvider {
    inner: MockWalletProvider,
    gate: Notify,
    calls: Mutex<Vec<&'static str>>,
}

#[allow(dead_code)]
impl GatedProvider {
    pub fn new(inner: MockWalletProvider) -> Self {
        Self {
            inner,
            gate: Notify::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Allow one blocked account query to proceed
    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Wait until the account query has been entered
    pub async fn entered_query(&self) {
        for _ in 0..500 {
            if self.inner.query_count() > 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("account query was never entered");
    }
}

#[async_trait]
impl WalletProvider for GatedProvider {
    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    async fn connected_accounts(&self) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push("query");
        let accounts = self.inner.connected_accounts().await;
        self.gate.notified().await;
        accounts
    }

    async fn request_connection(&self) -> Result<String> {
        self.calls.lock().unwrap().push("prompt");
        self.inner.request_connection().await
    }

    async fn sign_message(&self, address: &str, message: &str) -> Result<String> {
        self.calls.lock().unwrap().push("sign");
        self.inner.sign_message(address, message).await
    }
}
