//! Seed the record store from a registry street search.
//!
//! Queries the public registry's address search for a state, city, and
//! street fragment, then runs each returned code through the regular
//! lookup-or-create flow so the cache fills exactly as it would under
//! live traffic.

use std::env;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use cep_backend::domain::CepService;
use cep_backend::outbound::persistence::{DbPool, DieselCepRepository, PoolConfig};
use cep_backend::outbound::viacep::ViaCepHttpSource;

/// `seed-ceps` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seed-ceps",
    about = "Populate the CEP cache from a registry street search",
    version
)]
struct CliArgs {
    /// Two-letter state code to search within.
    #[arg(long, value_name = "uf", default_value = "RS")]
    uf: String,
    /// City to search within.
    #[arg(long, value_name = "city", default_value = "Porto Alegre")]
    city: String,
    /// Street name fragment to search for.
    #[arg(long, value_name = "street", default_value = "Domingos")]
    street: String,
    /// Registry base URL; must end with a slash.
    #[arg(long = "base-url", value_name = "url", default_value = "https://viacep.com.br/")]
    base_url: String,
    /// Database connection URL. Falls back to `CEP_DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

/// One entry of the registry's street-search listing. Only the code matters;
/// the lookup flow fetches the full record per code.
#[derive(Debug, Deserialize)]
struct SearchEntryDto {
    cep: String,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let base_url = Url::parse(&args.base_url)
        .map_err(|error| io::Error::other(format!("invalid base URL: {error}")))?;

    let codes = search_codes(&base_url, &args.uf, &args.city, &args.street).await?;
    info!(count = codes.len(), uf = %args.uf, city = %args.city, street = %args.street, "search returned codes");

    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let repository = Arc::new(DieselCepRepository::new(pool));
    let source = ViaCepHttpSource::with_timeout(base_url, Duration::from_secs(10))
        .map_err(|error| io::Error::other(format!("create registry client: {error}")))?;
    let service = CepService::new(repository, Arc::new(source));

    let mut inserted = 0usize;
    let mut failed = 0usize;
    for code in &codes {
        match service.get_or_create(code).await {
            Ok(record) => {
                inserted += 1;
                info!(code = %record.code.as_str(), "record cached");
            }
            Err(error) => {
                failed += 1;
                warn!(code = %code, %error, "seeding code failed");
            }
        }
    }

    info!(total = codes.len(), inserted, failed, "seeding finished");
    if failed > 0 {
        return Err(io::Error::other(format!("{failed} codes failed to seed")));
    }
    Ok(())
}

/// Fetch the street-search listing and return the codes it names.
async fn search_codes(
    base_url: &Url,
    uf: &str,
    city: &str,
    street: &str,
) -> io::Result<Vec<String>> {
    let url = base_url
        .join(&format!("ws/{uf}/{city}/{street}/json/"))
        .map_err(|error| io::Error::other(format!("invalid search URL: {error}")))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;
    let response = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|error| io::Error::other(format!("search request failed: {error}")))?
        .error_for_status()
        .map_err(|error| io::Error::other(format!("search request failed: {error}")))?;

    let entries: Vec<SearchEntryDto> = response
        .json()
        .await
        .map_err(|error| io::Error::other(format!("search payload malformed: {error}")))?;
    Ok(entries.into_iter().map(|entry| entry.cep).collect())
}

fn resolve_database_url(cli_value: Option<String>) -> io::Result<String> {
    match cli_value {
        Some(url) => Ok(url),
        None => env::var("CEP_DATABASE_URL").map_err(|_| {
            io::Error::other("database URL missing: pass --database-url or set CEP_DATABASE_URL")
        }),
    }
}
