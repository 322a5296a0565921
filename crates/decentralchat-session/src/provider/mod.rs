/*
[INPUT]:  Wallet capability detection, account queries, signing requests
[OUTPUT]: Provider trait boundary and shipped implementations
[POS]:    Provider layer - sole boundary to the external signing capability
[UPDATE]: When adding new provider implementations or trait operations
*/

pub mod local_key;
pub mod wallet;

pub use local_key::LocalKeyProvider;
pub use wallet::{MockWalletProvider, PromptOutcome, WalletProvider};
