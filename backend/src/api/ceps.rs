//! CEP API handlers.
//!
//! The wire format keeps the upstream registry's field names (`cep`,
//! `logradouro`, `bairro`, ...) so cached payloads stay interchangeable with
//! the registry's own responses.

use actix_web::{get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{CepPatch, CepRecord, CepService};

use super::error::{ApiResult, ErrorBody};

/// A cached postal-code record as rendered on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CepRecordBody {
    /// Opaque record identifier.
    pub id: Uuid,
    /// Canonical postal code.
    #[schema(example = "01310-100")]
    pub cep: String,
    /// Street name.
    #[schema(example = "Avenida Paulista")]
    pub logradouro: String,
    /// Address complement.
    pub complemento: Option<String>,
    /// Unit designator.
    pub unidade: Option<String>,
    /// Neighbourhood.
    #[schema(example = "Bela Vista")]
    pub bairro: String,
    /// City.
    #[schema(example = "São Paulo")]
    pub localidade: String,
    /// Two-letter state code.
    #[schema(example = "SP")]
    pub uf: String,
    /// Full state name.
    pub estado: String,
    /// Macro-region name.
    pub regiao: String,
    /// IBGE municipality code.
    pub ibge: Option<String>,
    /// GIA registry code.
    pub gia: Option<String>,
    /// Telephone area code.
    pub ddd: Option<String>,
    /// SIAFI institution code.
    pub siafi: Option<String>,
    /// Favourite flag.
    pub favorito: bool,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<CepRecord> for CepRecordBody {
    fn from(record: CepRecord) -> Self {
        Self {
            id: record.id,
            cep: record.code.as_str().to_owned(),
            logradouro: record.street,
            complemento: record.complement,
            unidade: record.unit,
            bairro: record.neighborhood,
            localidade: record.locality,
            uf: record.state_code,
            estado: record.state_name,
            regiao: record.region,
            ibge: record.ibge,
            gia: record.gia,
            ddd: record.area_code,
            siafi: record.siafi,
            favorito: record.is_favorite,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Request body for the favourite toggle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteBody {
    /// Desired favourite flag value.
    pub favorite: bool,
}

/// Response confirming a favourite toggle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponseBody {
    /// The code the flag was applied to.
    #[schema(example = "01310-100")]
    pub cep: String,
    /// The flag value now stored.
    pub favorite: bool,
}

/// Request body for partial updates; both fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatchBody {
    /// Replacement neighbourhood.
    pub bairro: Option<String>,
    /// Replacement street.
    pub logradouro: Option<String>,
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    /// Human-readable confirmation.
    #[schema(example = "CEP updated successfully")]
    pub message: String,
}

/// Look up a CEP, fetching and caching it from the public registry on the
/// first request for an unseen code.
#[utoipa::path(
    get,
    path = "/{cep}",
    tags = ["cep"],
    params(("cep" = String, Path, description = "Postal code in NNNNN-NNN form")),
    responses(
        (status = 200, description = "Cached or freshly fetched record", body = CepRecordBody),
        (status = 400, description = "Malformed postal code", body = ErrorBody),
        (status = 404, description = "Code unknown to the registry", body = ErrorBody),
        (status = 502, description = "Registry unreachable", body = ErrorBody)
    ),
    operation_id = "getCep"
)]
#[get("/{cep}")]
pub async fn get_cep(
    service: web::Data<CepService>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CepRecordBody>> {
    let record = service.get_or_create(&path).await?;
    Ok(web::Json(record.into()))
}

/// List every cached record.
#[utoipa::path(
    get,
    path = "/",
    tags = ["cep"],
    responses(
        (status = 200, description = "All cached records", body = [CepRecordBody])
    ),
    operation_id = "listCeps"
)]
#[get("/")]
pub async fn list_ceps(
    service: web::Data<CepService>,
) -> ApiResult<web::Json<Vec<CepRecordBody>>> {
    let records = service.list_all().await?;
    Ok(web::Json(records.into_iter().map(Into::into).collect()))
}

/// Flag or unflag a cached CEP as favourite. The record must already be
/// cached; favouriting never triggers an upstream fetch.
#[utoipa::path(
    post,
    path = "/{cep}/favorite",
    tags = ["cep"],
    params(("cep" = String, Path, description = "Postal code in NNNNN-NNN form")),
    request_body = FavoriteBody,
    responses(
        (status = 200, description = "Flag applied", body = FavoriteResponseBody),
        (status = 400, description = "Malformed postal code", body = ErrorBody),
        (status = 404, description = "Code not cached", body = ErrorBody)
    ),
    operation_id = "setFavorite"
)]
#[post("/{cep}/favorite")]
pub async fn set_favorite(
    service: web::Data<CepService>,
    path: web::Path<String>,
    body: web::Json<FavoriteBody>,
) -> ApiResult<web::Json<FavoriteResponseBody>> {
    let record = service.set_favorite(&path, body.favorite).await?;
    Ok(web::Json(FavoriteResponseBody {
        cep: record.code.as_str().to_owned(),
        favorite: record.is_favorite,
    }))
}

/// Update the neighbourhood and/or street of a cached CEP.
#[utoipa::path(
    patch,
    path = "/{cep}",
    tags = ["cep"],
    params(("cep" = String, Path, description = "Postal code in NNNNN-NNN form")),
    request_body = PatchBody,
    responses(
        (status = 200, description = "Record updated", body = MessageBody),
        (status = 400, description = "Malformed code or empty patch", body = ErrorBody),
        (status = 404, description = "Code not cached", body = ErrorBody)
    ),
    operation_id = "patchCep"
)]
#[patch("/{cep}")]
pub async fn patch_cep(
    service: web::Data<CepService>,
    path: web::Path<String>,
    body: web::Json<PatchBody>,
) -> ApiResult<web::Json<MessageBody>> {
    let request = body.into_inner();
    let patch = CepPatch::new(request.bairro, request.logradouro);
    service.patch(&path, &patch).await?;
    Ok(web::Json(MessageBody {
        message: "CEP updated successfully".to_owned(),
    }))
}
