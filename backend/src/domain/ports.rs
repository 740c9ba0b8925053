//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the reconciliation service expects to interact with
//! driven adapters (the PostgreSQL record store and the upstream postal
//! registry). Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error;

use super::cep::{CepCode, CepPatch, CepRecord, NewCepRecord};

/// Errors surfaced by record-store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CepPersistenceError {
    /// Store connection could not be established or was lost.
    #[error("cep store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("cep store query failed: {message}")]
    Query { message: String },
    /// The unique index on `code` rejected an insert. Expected under
    /// concurrent first-time lookups; the service recovers by re-reading.
    #[error("cep {code} already exists")]
    DuplicateCode { code: String },
}

impl CepPersistenceError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-key violations on `code`.
    pub fn duplicate_code(code: impl Into<String>) -> Self {
        Self::DuplicateCode { code: code.into() }
    }
}

/// Errors surfaced by upstream-registry adapters.
///
/// "Code unknown to the registry" is not an error here; sources report it as
/// `Ok(None)` because it is a legitimate business outcome with its own
/// status code downstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CepSourceError {
    /// The registry did not answer within the configured timeout.
    #[error("upstream registry timed out: {message}")]
    Timeout { message: String },
    /// Connection failure or non-success HTTP status.
    #[error("upstream registry transport failure: {message}")]
    Transport { message: String },
    /// The registry answered with a payload we could not decode.
    #[error("upstream registry returned an unreadable payload: {message}")]
    Decode { message: String },
}

impl CepSourceError {
    /// Helper for timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for transport-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for payload decoding failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Address fields as reported by the upstream registry, before the store
/// assigns identity and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamCep {
    /// Street name (logradouro).
    pub street: String,
    /// Address complement, blank values normalised away.
    pub complement: Option<String>,
    /// Unit designator, blank values normalised away.
    pub unit: Option<String>,
    /// Neighbourhood (bairro).
    pub neighborhood: String,
    /// City (localidade).
    pub locality: String,
    /// Two-letter state code (UF).
    pub state_code: String,
    /// Full state name, when the registry provides it.
    pub state_name: String,
    /// Macro-region name, when the registry provides it.
    pub region: String,
    /// IBGE municipality code.
    pub ibge: Option<String>,
    /// GIA registry code.
    pub gia: Option<String>,
    /// Telephone area code (DDD).
    pub area_code: Option<String>,
    /// SIAFI institution code.
    pub siafi: Option<String>,
}

impl UpstreamCep {
    /// Combine registry fields with the validated code into a create request.
    pub fn into_new_record(self, code: CepCode) -> NewCepRecord {
        NewCepRecord {
            code,
            street: self.street,
            complement: self.complement,
            unit: self.unit,
            neighborhood: self.neighborhood,
            locality: self.locality,
            state_code: self.state_code,
            state_name: self.state_name,
            region: self.region,
            ibge: self.ibge,
            gia: self.gia,
            area_code: self.area_code,
            siafi: self.siafi,
        }
    }
}

/// Persistence port for cached postal-code records.
///
/// All operations are keyed by the canonical code. Absence is a normal
/// result (`Ok(None)`), never an error. Side effects are confined to the
/// backing store; implementations must not perform network lookups.
#[async_trait]
pub trait CepRepository: Send + Sync {
    /// Fetch a record by its canonical code.
    async fn find_by_code(
        &self,
        code: &CepCode,
    ) -> Result<Option<CepRecord>, CepPersistenceError>;

    /// List every cached record in storage order.
    async fn list_all(&self) -> Result<Vec<CepRecord>, CepPersistenceError>;

    /// Insert a new record, generating identity and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`CepPersistenceError::DuplicateCode`] when the unique index
    /// on `code` rejects the insert.
    async fn create(&self, record: NewCepRecord) -> Result<CepRecord, CepPersistenceError>;

    /// Apply a partial update, bumping `updated_at`. `Ok(None)` signals
    /// that no record matched the code.
    async fn apply_patch(
        &self,
        code: &CepCode,
        patch: &CepPatch,
    ) -> Result<Option<CepRecord>, CepPersistenceError>;

    /// Set the favourite flag, bumping `updated_at`. `Ok(None)` signals
    /// that no record matched the code.
    async fn set_favorite(
        &self,
        code: &CepCode,
        favorite: bool,
    ) -> Result<Option<CepRecord>, CepPersistenceError>;
}

/// Lookup port for the upstream public registry.
#[async_trait]
pub trait CepSource: Send + Sync {
    /// Fetch address data for a digits-only code. `Ok(None)` means the
    /// registry does not know the code.
    async fn fetch(&self, digits: &str) -> Result<Option<UpstreamCep>, CepSourceError>;
}
