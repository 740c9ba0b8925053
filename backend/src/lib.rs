//! Caching lookup service for Brazilian postal codes (CEPs).
//!
//! The first request for a code consults the public registry and stores the
//! result; later requests are served from PostgreSQL. Cached records can be
//! flagged as favourites and have their street or neighbourhood overridden.

pub mod api;
pub mod doc;
pub mod domain;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
