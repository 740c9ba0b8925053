//! Application configuration loaded via OrthoConfig.
//!
//! One configuration struct constructed at process start and passed by
//! reference into the components that need it; nothing reads the
//! environment after startup. Values come from `CEP_`-prefixed environment
//! variables (or CLI flags), e.g. `CEP_DATABASE_URL`, `CEP_PORT`.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://viacep.com.br/";
const DEFAULT_SWAGGER_ROUTE: &str = "/docs";

/// Configuration values controlling the server, store, and upstream client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CEP")]
pub struct AppConfig {
    /// PostgreSQL connection string for the record store.
    pub database_url: String,
    /// TCP port the HTTP server binds to.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// Base URL of the public postal registry; must end with a slash.
    pub upstream_base_url: Option<String>,
    /// Request timeout for registry lookups, in seconds.
    #[ortho_config(default = 10)]
    pub upstream_timeout_secs: u64,
    /// Route the Swagger UI is mounted on.
    pub swagger_route: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl AppConfig {
    /// The registry base URL, falling back to the public ViaCEP deployment.
    pub fn upstream_base_url(&self) -> &str {
        self.upstream_base_url
            .as_deref()
            .unwrap_or(DEFAULT_UPSTREAM_BASE_URL)
    }

    /// The Swagger UI route, falling back to `/docs`.
    pub fn swagger_route(&self) -> &str {
        self.swagger_route.as_deref().unwrap_or(DEFAULT_SWAGGER_ROUTE)
    }
}
