//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed remote catalogue source
//! - **store**: JSON snapshot and in-memory local stores
//!
//! Adapters are thin translators between domain types and wire or storage
//! representations. They contain no business logic.

pub mod http;
pub mod store;
