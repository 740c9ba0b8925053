//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed record store using Diesel ORM
//! - **viacep**: reqwest-backed client for the public postal registry
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations; they contain no business logic.

pub mod persistence;
pub mod viacep;
