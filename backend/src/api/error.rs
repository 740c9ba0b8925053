//! HTTP error payloads and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns by translating
//! [`CepError`] into actix responses here. Every error response carries a
//! stable `{message, details}` pair so clients can handle each taxonomy
//! entry deterministically; infrastructure failures are logged server-side
//! and surface only a generic envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::CepError;
use crate::domain::ports::CepPersistenceError;

/// Standard error envelope returned by the HTTP adapter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Stable human-readable summary.
    #[schema(example = "CEP not found")]
    pub message: String,
    /// Stable explanation of the failure.
    #[schema(example = "The given CEP was not found in the local base or the registry.")]
    pub details: String,
}

/// Transport-level error: an [`ErrorBody`] plus the status it maps to.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// The status code this error renders with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response envelope.
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<CepError> for ApiError {
    fn from(value: CepError) -> Self {
        let status = match &value {
            CepError::Validation(_) | CepError::NoDataToUpdate => StatusCode::BAD_REQUEST,
            CepError::NotFound => StatusCode::NOT_FOUND,
            CepError::Upstream(source) => {
                error!(error = %source, "upstream registry failure");
                StatusCode::BAD_GATEWAY
            }
            CepError::Repository(CepPersistenceError::Connection { message }) => {
                error!(error = %message, "record store unreachable");
                StatusCode::SERVICE_UNAVAILABLE
            }
            CepError::Repository(store) => {
                error!(error = %store, "record store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            body: ErrorBody {
                message: value.message().to_owned(),
                details: value.details().to_owned(),
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::CepValidationError;
    use crate::domain::ports::CepSourceError;

    #[rstest]
    #[case(CepError::Validation(CepValidationError::NeedsFormatting), StatusCode::BAD_REQUEST)]
    #[case(CepError::Validation(CepValidationError::WrongLength), StatusCode::BAD_REQUEST)]
    #[case(CepError::Validation(CepValidationError::InvalidFormat), StatusCode::BAD_REQUEST)]
    #[case(CepError::NoDataToUpdate, StatusCode::BAD_REQUEST)]
    #[case(CepError::NotFound, StatusCode::NOT_FOUND)]
    #[case(
        CepError::Upstream(CepSourceError::timeout("deadline elapsed")),
        StatusCode::BAD_GATEWAY
    )]
    #[case(
        CepError::Repository(CepPersistenceError::connection("refused")),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case(
        CepError::Repository(CepPersistenceError::query("syntax error")),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn each_domain_error_maps_to_its_status(#[case] error: CepError, #[case] expected: StatusCode) {
        let api_error = ApiError::from(error);
        assert_eq!(api_error.status(), expected);
        assert!(!api_error.body().message.is_empty());
        assert!(!api_error.body().details.is_empty());
    }

    #[test]
    fn infrastructure_failures_never_leak_internal_detail() {
        let api_error = ApiError::from(CepError::Repository(CepPersistenceError::query(
            "relation \"ceps\" does not exist",
        )));
        assert!(!api_error.body().details.contains("relation"));
    }
}
