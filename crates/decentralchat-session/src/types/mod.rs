/*
[INPUT]:  Session data model definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions shared across the crate
[UPDATE]: When the session data model changes or new types added
*/

pub mod models;

pub use models::*;
