/*
[INPUT]:  Wallet provider boundary and session state transitions
[OUTPUT]: Session lifecycle orchestration and the shared state store
[POS]:    Session layer - the authentication core
[UPDATE]: When lifecycle operations or the store contract change
*/

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::{SessionStore, Subscription};
