/*
[INPUT]:  EVM private key (hex string) and signing requests
[OUTPUT]: Checksummed account address and EIP-191 signatures
[POS]:    Provider layer - in-process key-backed implementation
[UPDATE]: When signing logic or address formatting changes
*/

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::error::{Result, SessionError};
use crate::provider::WalletProvider;

/// Wallet provider backed by an in-process secp256k1 key
///
/// Useful for headless environments and integration tests where no external
/// wallet UI exists. The capability is always detected, and connecting
/// auto-authorizes the configured account since a local key has no prompt to
/// decline. Signatures are EIP-191 personal-message signatures, hex encoded
/// with a `0x` prefix.
#[derive(Debug)]
pub struct LocalKeyProvider {
    signer: PrivateKeySigner,
    address: String,
    authorized: AtomicBool,
}

impl LocalKeyProvider {
    /// Create a provider from a hex-encoded private key
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings. The account
    /// starts unauthorized; `request_connection` authorizes it.
    pub fn new(private_key_hex: &str) -> Result<Self> {
        let private_key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| SessionError::Config(format!("invalid private key: {e}")))?;

        let address = signer.address().to_checksum(None);

        Ok(Self {
            signer,
            address,
            authorized: AtomicBool::new(false),
        })
    }

    /// Create a provider whose account is already authorized
    ///
    /// Startup resumption against this provider recovers the session without
    /// any connect step.
    pub fn pre_authorized(private_key_hex: &str) -> Result<Self> {
        let provider = Self::new(private_key_hex)?;
        provider.authorized.store(true, Ordering::SeqCst);
        Ok(provider)
    }

    /// The checksummed address of the backing key
    pub fn address(&self) -> &str {
        &self.address
    }
}

#[async_trait]
impl WalletProvider for LocalKeyProvider {
    fn is_available(&self) -> bool {
        true
    }

    async fn connected_accounts(&self) -> Result<Vec<String>> {
        if self.authorized.load(Ordering::SeqCst) {
            Ok(vec![self.address.clone()])
        } else {
            Ok(Vec::new())
        }
    }

    async fn request_connection(&self) -> Result<String> {
        self.authorized.store(true, Ordering::SeqCst);
        Ok(self.address.clone())
    }

    async fn sign_message(&self, address: &str, message: &str) -> Result<String> {
        if !address.eq_ignore_ascii_case(&self.address) {
            return Err(SessionError::SigningFailed(format!(
                "unknown account: {address}"
            )));
        }

        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| SessionError::SigningFailed(e.to_string()))?;

        // [r, s, v] hex encoded
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}
