/*
[INPUT]:  Session state snapshots and store transitions
[OUTPUT]: Per-navigation routing decisions
[POS]:    Routing layer - protected-view access policy
[UPDATE]: When decision variants or evaluation rules change
*/

pub mod guard;

pub use guard::{RouteDecision, RouteGuard};
