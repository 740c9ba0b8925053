//! ViaCEP outbound adapter.
//!
//! A thin HTTP implementation of the [`crate::domain::ports::CepSource`]
//! port against the public ViaCEP registry.

mod dto;
mod http_source;

pub use http_source::ViaCepHttpSource;
