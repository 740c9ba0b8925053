//! Diesel row structs for the `ceps` table.
//!
//! Internal to the persistence adapter; the domain only ever sees
//! [`crate::domain::CepRecord`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{CepCode, CepPatch, CepRecord, NewCepRecord};

use super::schema::ceps;

/// Full row as read from the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ceps)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CepRow {
    pub id: Uuid,
    pub code: String,
    pub street: String,
    pub complement: Option<String>,
    pub unit: Option<String>,
    pub neighborhood: String,
    pub locality: String,
    pub state_code: String,
    pub state_name: String,
    pub region: String,
    pub ibge: Option<String>,
    pub gia: Option<String>,
    pub area_code: Option<String>,
    pub siafi: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CepRow {
    /// Convert a stored row into the domain entity.
    ///
    /// Fails with a readable message when the stored code is not canonical,
    /// which would indicate an out-of-band write bypassing the validator.
    pub fn into_record(self) -> Result<CepRecord, String> {
        let code = CepCode::parse(self.code)
            .map_err(|err| format!("stored code is not canonical: {err}"))?;
        Ok(CepRecord {
            id: self.id,
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
            is_favorite: self.is_favorite,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Insertable row; identity and timestamps are assigned here so the insert
/// is a single round trip.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ceps)]
pub struct NewCepRow {
    pub id: Uuid,
    pub code: String,
    pub street: String,
    pub complement: Option<String>,
    pub unit: Option<String>,
    pub neighborhood: String,
    pub locality: String,
    pub state_code: String,
    pub state_name: String,
    pub region: String,
    pub ibge: Option<String>,
    pub gia: Option<String>,
    pub area_code: Option<String>,
    pub siafi: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewCepRow {
    /// Materialise a create request into an insertable row, generating the
    /// identifier and both timestamps.
    pub fn from_record(record: NewCepRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: record.code.as_str().to_owned(),
            street: record.street,
            complement: record.complement,
            unit: record.unit,
            neighborhood: record.neighborhood,
            locality: record.locality,
            state_code: record.state_code,
            state_name: record.state_name,
            region: record.region,
            ibge: record.ibge,
            gia: record.gia,
            area_code: record.area_code,
            siafi: record.siafi,
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for partial updates. `None` fields are skipped by Diesel, so
/// only the provided overrides are written; `updated_at` always bumps.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = ceps)]
pub struct CepPatchChangeset {
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl CepPatchChangeset {
    /// Build a changeset from a domain patch.
    pub fn from_patch(patch: &CepPatch) -> Self {
        Self {
            neighborhood: patch.neighborhood.clone(),
            street: patch.street.clone(),
            updated_at: Utc::now(),
        }
    }
}

/// Changeset flipping the favourite flag.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = ceps)]
pub struct FavoriteChangeset {
    pub is_favorite: bool,
    pub updated_at: DateTime<Utc>,
}

impl FavoriteChangeset {
    /// Build a changeset for the given flag value.
    pub fn new(favorite: bool) -> Self {
        Self {
            is_favorite: favorite,
            updated_at: Utc::now(),
        }
    }
}
