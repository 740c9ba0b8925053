//! Reqwest-backed ViaCEP source adapter.
//!
//! This adapter owns transport details only: URL construction, the request
//! timeout, HTTP error mapping, and JSON decoding into the domain shape.
//! One attempt per call; the caller decides what a failure means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::ViaCepResponseDto;
use crate::domain::ports::{CepSource, CepSourceError, UpstreamCep};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// ViaCEP source adapter performing HTTP GET requests against one base URL.
pub struct ViaCepHttpSource {
    client: Client,
    base_url: Url,
}

impl ViaCepHttpSource {
    /// Build an adapter with the default ten-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout. A timed-out
    /// request surfaces as [`CepSourceError::Timeout`]; nothing has been
    /// written at that point in the pipeline, so no cleanup is needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Resolve the lookup URL for a digits-only code.
    fn lookup_url(&self, digits: &str) -> Result<Url, CepSourceError> {
        self.base_url
            .join(&format!("ws/{digits}/json/"))
            .map_err(|err| {
                CepSourceError::transport(format!("could not build registry URL: {err}"))
            })
    }
}

#[async_trait]
impl CepSource for ViaCepHttpSource {
    async fn fetch(&self, digits: &str) -> Result<Option<UpstreamCep>, CepSourceError> {
        let url = self.lookup_url(digits)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_payload(body.as_ref())
    }
}

fn parse_payload(body: &[u8]) -> Result<Option<UpstreamCep>, CepSourceError> {
    let decoded: ViaCepResponseDto = serde_json::from_slice(body).map_err(|error| {
        CepSourceError::decode(format!("invalid registry JSON payload: {error}"))
    })?;
    decoded.into_upstream().map_err(CepSourceError::decode)
}

fn map_transport_error(error: reqwest::Error) -> CepSourceError {
    if error.is_timeout() {
        CepSourceError::timeout(error.to_string())
    } else {
        CepSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CepSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CepSourceError::timeout(message)
        }
        _ => CepSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use rstest::rstest;

    use super::*;

    fn source() -> ViaCepHttpSource {
        let base = Url::parse("https://viacep.com.br/").expect("valid base URL");
        ViaCepHttpSource::new(base).expect("client should build")
    }

    #[test]
    fn lookup_url_appends_digits_path() {
        let url = source().lookup_url("01310100").expect("url should build");
        assert_eq!(url.as_str(), "https://viacep.com.br/ws/01310100/json/");
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, true)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    #[case::too_many_requests(StatusCode::TOO_MANY_REQUESTS, false)]
    fn maps_http_statuses_to_expected_errors(
        #[case] status: StatusCode,
        #[case] expect_timeout: bool,
    ) {
        let error = map_status_error(status, b"<html>unavailable</html>");
        if expect_timeout {
            assert!(matches!(error, CepSourceError::Timeout { .. }));
        } else {
            assert!(matches!(error, CepSourceError::Transport { .. }));
        }
    }

    #[test]
    fn parses_registry_payload_into_upstream_record() {
        let body = r#"{
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP",
            "estado": "São Paulo",
            "regiao": "Sudeste"
        }"#
        .as_bytes();

        let upstream = parse_payload(body)
            .expect("payload decodes")
            .expect("not a miss");
        assert_eq!(upstream.locality, "São Paulo");
    }

    #[test]
    fn error_sentinel_parses_as_miss() {
        assert_eq!(parse_payload(br#"{"erro": true}"#).expect("decodes"), None);
    }

    #[test]
    fn malformed_body_maps_to_decode_error() {
        let error = parse_payload(b"not json").expect_err("decode should fail");
        assert!(matches!(error, CepSourceError::Decode { .. }));
    }

    #[test]
    fn long_error_bodies_are_truncated_in_messages() {
        let body = "x".repeat(500);
        let error = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes());
        let CepSourceError::Transport { message } = error else {
            panic!("502 should map to Transport");
        };
        assert!(message.len() < 200);
        assert!(message.ends_with("..."));
    }
}
