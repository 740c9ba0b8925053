//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API,
//! registering every HTTP endpoint and the wire schemas they exchange. The
//! generated document backs the Swagger UI mounted at the configured route.

use utoipa::OpenApi;

use crate::api::ceps::{
    CepRecordBody, FavoriteBody, FavoriteResponseBody, MessageBody, PatchBody,
};
use crate::api::error::ErrorBody;
use crate::api::health::HealthBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEP cache backend",
        description = "Looks up Brazilian postal codes, caching registry results locally."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::api::ceps::get_cep,
        crate::api::ceps::list_ceps,
        crate::api::ceps::set_favorite,
        crate::api::ceps::patch_cep,
        crate::api::health::health,
    ),
    components(schemas(
        CepRecordBody,
        FavoriteBody,
        FavoriteResponseBody,
        PatchBody,
        MessageBody,
        ErrorBody,
        HealthBody
    )),
    tags(
        (name = "cep", description = "Postal-code lookup, favourites, and overrides"),
        (name = "app", description = "Endpoints related to the application itself")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying schema registration and endpoint references.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    #[test]
    fn openapi_registers_all_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/{cep}", "/", "/{cep}/favorite", "/health"] {
            assert!(
                doc.paths.paths.contains_key(path),
                "OpenAPI document should register {path}"
            );
        }
    }

    #[test]
    fn record_schema_exposes_registry_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let record = schemas.get("CepRecordBody").expect("record schema");

        let RefOr::T(Schema::Object(object)) = record else {
            panic!("expected an object schema");
        };
        for field in ["cep", "logradouro", "bairro", "favorito", "createdAt"] {
            assert!(
                object.properties.contains_key(field),
                "record schema should expose `{field}`"
            );
        }
    }
}
