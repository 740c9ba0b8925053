//! Transport-agnostic domain core.
//!
//! Everything under this module is free of actix, Diesel, and reqwest
//! concerns: the validated code type, the cached record entity, the port
//! traits adapters implement, and the reconciliation service that ties them
//! together.

pub mod cep;
pub mod error;
pub mod ports;
pub mod service;

pub use cep::{CepCode, CepPatch, CepRecord, CepValidationError, NewCepRecord};
pub use error::CepError;
pub use service::CepService;
