//! Domain-level error taxonomy.
//!
//! These errors are transport agnostic. The HTTP adapter maps each variant
//! to a status code and a stable `{message, details}` envelope; nothing in
//! here knows about actix. `DuplicateCode` never appears: the service
//! absorbs it before results reach a caller.

use thiserror::Error;

use super::cep::CepValidationError;
use super::ports::{CepPersistenceError, CepSourceError};

/// Closed set of failures the reconciliation service can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CepError {
    /// The raw code failed shape validation before any I/O.
    #[error(transparent)]
    Validation(#[from] CepValidationError),
    /// The code is unknown both locally and upstream (or locally, for
    /// operations that never consult the registry).
    #[error("CEP not found")]
    NotFound,
    /// A patch request carried no updatable fields.
    #[error("no data to update")]
    NoDataToUpdate,
    /// The upstream registry could not be reached or understood.
    #[error(transparent)]
    Upstream(#[from] CepSourceError),
    /// The record store failed; duplicate-key outcomes are recovered by
    /// the service and only surface here if convergence itself fails.
    #[error(transparent)]
    Repository(CepPersistenceError),
}

impl CepError {
    /// Stable human-readable summary for clients.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Validation(CepValidationError::NeedsFormatting) => "CEP needs formatting",
            Self::Validation(CepValidationError::WrongLength) => "CEP must have 9 characters",
            Self::Validation(CepValidationError::InvalidFormat) => "CEP is invalid",
            Self::NotFound => "CEP not found",
            Self::NoDataToUpdate => "No data to update",
            Self::Upstream(_) => "Upstream registry unavailable",
            Self::Repository(_) => "Internal server error",
        }
    }

    /// Stable explanation string accompanying [`CepError::message`].
    pub fn details(&self) -> &'static str {
        match self {
            Self::Validation(CepValidationError::NeedsFormatting) => {
                "The given CEP must be formatted with a hyphen (-)."
            }
            Self::Validation(CepValidationError::WrongLength) => {
                "The given CEP must be exactly 9 characters long."
            }
            Self::Validation(CepValidationError::InvalidFormat) => {
                "The given CEP does not match the NNNNN-NNN format."
            }
            Self::NotFound => "The given CEP was not found in the local base or the registry.",
            Self::NoDataToUpdate => {
                "No field that needs or can be updated was provided in the request."
            }
            Self::Upstream(_) => "The postal registry could not be consulted. Try again later.",
            Self::Repository(_) => "An unexpected storage failure occurred.",
        }
    }
}

impl From<CepPersistenceError> for CepError {
    fn from(value: CepPersistenceError) -> Self {
        Self::Repository(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CepError::from(CepValidationError::NeedsFormatting), "CEP needs formatting")]
    #[case(CepError::from(CepValidationError::WrongLength), "CEP must have 9 characters")]
    #[case(CepError::from(CepValidationError::InvalidFormat), "CEP is invalid")]
    #[case(CepError::NotFound, "CEP not found")]
    #[case(CepError::NoDataToUpdate, "No data to update")]
    fn each_variant_has_a_stable_message(#[case] error: CepError, #[case] expected: &str) {
        assert_eq!(error.message(), expected);
        assert!(!error.details().is_empty());
    }

    #[test]
    fn storage_failures_never_leak_internal_detail() {
        let error = CepError::from(CepPersistenceError::query("relation ceps does not exist"));
        assert_eq!(error.message(), "Internal server error");
        assert!(!error.details().contains("relation"));
    }
}
