//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types
//! - `wire.rs` — Raw serde structs matching backend responses, where they
//!   differ from the domain types
//! - `convert.rs` — Conversions from wire records
//! - `state.rs` — State containers kept in step with the server
//! - `client.rs` — Sub-client with HTTP methods and caching

pub mod instrument;
pub mod order;
pub mod position;
pub mod space;
pub mod venue;
