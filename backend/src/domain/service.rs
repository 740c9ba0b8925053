//! Reconciliation service: the lookup-or-create workflow.
//!
//! The service orchestrates the validator, the record store, and the
//! upstream registry. It holds no mutable state between requests; each call
//! is a short sequential pipeline, so many instances can run behind a load
//! balancer without coordination. Correctness under concurrent first-time
//! lookups rests on the store's unique index on `code`: exactly one insert
//! wins and the loser re-reads the winner's row.

use std::sync::Arc;

use tracing::{debug, info};

use super::cep::{CepCode, CepPatch, CepRecord};
use super::error::CepError;
use super::ports::{CepPersistenceError, CepRepository, CepSource};

/// Stateless orchestrator answering get-or-create and patch requests.
#[derive(Clone)]
pub struct CepService {
    repository: Arc<dyn CepRepository>,
    source: Arc<dyn CepSource>,
}

impl CepService {
    /// Build a service over a record store and an upstream source.
    pub fn new(repository: Arc<dyn CepRepository>, source: Arc<dyn CepSource>) -> Self {
        Self { repository, source }
    }

    /// Serve a record from the cache, fetching and persisting it on first
    /// sight of the code.
    ///
    /// Pipeline: validate → cache lookup (hit returns immediately, the
    /// registry is never consulted) → upstream fetch → persist. A
    /// [`CepPersistenceError::DuplicateCode`] from the insert means a
    /// concurrent request won the race; the now-existing record is re-read
    /// and returned, so the operation converges instead of failing.
    ///
    /// # Errors
    ///
    /// Validation failures, [`CepError::NotFound`] when the registry does
    /// not know the code (nothing is persisted), and upstream or store
    /// infrastructure failures.
    pub async fn get_or_create(&self, raw: &str) -> Result<CepRecord, CepError> {
        let code = CepCode::parse(raw)?;

        if let Some(record) = self.repository.find_by_code(&code).await? {
            debug!(cep = %code, "served from cache");
            return Ok(record);
        }

        let Some(upstream) = self.source.fetch(&code.digits()).await? else {
            debug!(cep = %code, "unknown to the upstream registry");
            return Err(CepError::NotFound);
        };

        match self.repository.create(upstream.into_new_record(code.clone())).await {
            Ok(record) => {
                info!(cep = %code, "cached from upstream registry");
                Ok(record)
            }
            Err(CepPersistenceError::DuplicateCode { .. }) => {
                debug!(cep = %code, "lost creation race, re-reading winner's record");
                self.repository
                    .find_by_code(&code)
                    .await?
                    .ok_or_else(|| {
                        CepError::Repository(CepPersistenceError::query(
                            "record missing after duplicate insert",
                        ))
                    })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// List every cached record.
    ///
    /// # Errors
    ///
    /// Store infrastructure failures only.
    pub async fn list_all(&self) -> Result<Vec<CepRecord>, CepError> {
        Ok(self.repository.list_all().await?)
    }

    /// Flag or unflag a cached record as favourite.
    ///
    /// Favouriting an unseen code is not a creation trigger, unlike
    /// [`CepService::get_or_create`]; the record must already exist.
    ///
    /// # Errors
    ///
    /// Validation failures, [`CepError::NotFound`] when the code is not
    /// cached, and store infrastructure failures.
    pub async fn set_favorite(&self, raw: &str, favorite: bool) -> Result<CepRecord, CepError> {
        let code = CepCode::parse(raw)?;

        self.repository
            .set_favorite(&code, favorite)
            .await?
            .ok_or(CepError::NotFound)
    }

    /// Apply a partial update to a cached record.
    ///
    /// An empty patch is rejected before touching storage. Existence is
    /// observed from the update's absent result rather than a prior read,
    /// saving a round trip.
    ///
    /// # Errors
    ///
    /// Validation failures, [`CepError::NoDataToUpdate`] for empty patches,
    /// [`CepError::NotFound`] when no record matches, and store
    /// infrastructure failures.
    pub async fn patch(&self, raw: &str, patch: &CepPatch) -> Result<CepRecord, CepError> {
        let code = CepCode::parse(raw)?;

        if patch.is_empty() {
            return Err(CepError::NoDataToUpdate);
        }

        self.repository
            .apply_patch(&code, patch)
            .await?
            .ok_or(CepError::NotFound)
    }
}
