//! Backend entry-point: wires configuration, the record store, the registry
//! client, and the HTTP routes together.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpServer, web};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use cep_backend::domain::CepService;
use cep_backend::outbound::persistence::{DbPool, DieselCepRepository, PoolConfig};
use cep_backend::outbound::viacep::ViaCepHttpSource;
use cep_backend::server::build_app;
use cep_backend::server::config::AppConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))?;

    let base_url = Url::parse(config.upstream_base_url())
        .map_err(|e| std::io::Error::other(format!("invalid upstream base URL: {e}")))?;
    let source =
        ViaCepHttpSource::with_timeout(base_url, Duration::from_secs(config.upstream_timeout_secs))
            .map_err(|e| std::io::Error::other(format!("registry client setup failed: {e}")))?;

    let pool = DbPool::new(PoolConfig::new(&config.database_url).with_max_size(config.pool_max_size))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;

    let service = web::Data::new(CepService::new(
        Arc::new(DieselCepRepository::new(pool)),
        Arc::new(source),
    ));

    let port = config.port;
    let swagger_route = config.swagger_route().to_owned();
    info!(port, swagger_route = %swagger_route, "starting HTTP server");

    HttpServer::new(move || build_app(service.clone(), &swagger_route))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}
