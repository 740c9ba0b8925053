//! HTTP server assembly.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::ceps::{get_cep, list_ceps, patch_cep, set_favorite};
use crate::api::health::health;
use crate::doc::ApiDoc;
use crate::domain::CepService;
use crate::middleware::RequestTrace;

pub mod config;

/// Assemble the application with every route registered.
///
/// `GET /{cep}` matches any single-segment path, so the fixed routes and the
/// Swagger UI are registered ahead of it.
pub fn build_app(
    service: web::Data<CepService>,
    swagger_route: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = Error,
        InitError = (),
    > + use<>,
> {
    let swagger = SwaggerUi::new(format!("{swagger_route}/{{_:.*}}"))
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    App::new()
        .app_data(service)
        .wrap(RequestTrace)
        .service(health)
        .service(swagger)
        .service(list_ceps)
        .service(set_favorite)
        .service(patch_cep)
        .service(get_cep)
}
