//! Canonical postal-code values and the cached record entity.
//!
//! `CepCode` is the validated key every other component works with. The
//! checks run in a fixed order so a given malformed input always reports the
//! same failure kind, regardless of how many rules it breaks.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Length of a canonical CEP: five digits, a hyphen, three digits.
const CANONICAL_LEN: usize = 9;

/// Position of the hyphen within a canonical CEP.
const SEPARATOR_INDEX: usize = 5;

/// A Brazilian postal code in canonical `NNNNN-NNN` form.
///
/// Construction goes through [`CepCode::parse`], so holding a `CepCode`
/// guarantees the canonical shape. The inner string is exactly what the
/// caller supplied; validation never rewrites it.
///
/// # Examples
/// ```
/// use cep_backend::domain::CepCode;
///
/// let code = CepCode::parse("01310-100").expect("valid code");
/// assert_eq!(code.as_str(), "01310-100");
/// assert_eq!(code.digits(), "01310100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CepCode(String);

impl CepCode {
    /// Validate a raw postal-code string.
    ///
    /// Checks run in order, each with its own failure kind:
    /// 1. no hyphen anywhere → [`CepValidationError::NeedsFormatting`]
    /// 2. length other than nine → [`CepValidationError::WrongLength`]
    /// 3. anything but `NNNNN-NNN` → [`CepValidationError::InvalidFormat`]
    ///
    /// An eight-character code without a hyphen therefore reports
    /// `NeedsFormatting`, not `WrongLength`.
    ///
    /// # Errors
    ///
    /// Returns the first failed check as a [`CepValidationError`].
    pub fn parse(raw: impl Into<String>) -> Result<Self, CepValidationError> {
        let raw = raw.into();
        if !raw.contains('-') {
            return Err(CepValidationError::NeedsFormatting);
        }
        if raw.chars().count() != CANONICAL_LEN {
            return Err(CepValidationError::WrongLength);
        }
        let canonical = raw.char_indices().all(|(index, ch)| {
            if index == SEPARATOR_INDEX {
                ch == '-'
            } else {
                ch.is_ascii_digit()
            }
        });
        if !canonical {
            return Err(CepValidationError::InvalidFormat);
        }
        Ok(Self(raw))
    }

    /// Borrow the canonical form used as the storage key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The code with the separator stripped, as the upstream registry
    /// expects it in its path segment.
    pub fn digits(&self) -> String {
        self.0.replace('-', "")
    }
}

impl fmt::Display for CepCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CepCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation failures returned by [`CepCode::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CepValidationError {
    /// The code has no hyphen and needs formatting first.
    #[error("CEP must be formatted with a hyphen")]
    NeedsFormatting,
    /// The code is not exactly nine characters long.
    #[error("CEP must be 9 characters long")]
    WrongLength,
    /// The code does not match the `NNNNN-NNN` shape.
    #[error("CEP is not a valid postal code")]
    InvalidFormat,
}

/// A cached postal-code record as persisted by the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct CepRecord {
    /// Opaque identifier generated at creation.
    pub id: Uuid,
    /// Canonical postal code; unique natural key for all lookups.
    pub code: CepCode,
    /// Street name (logradouro).
    pub street: String,
    /// Address complement, when the registry provides one.
    pub complement: Option<String>,
    /// Unit designator, when the registry provides one.
    pub unit: Option<String>,
    /// Neighbourhood (bairro); mutable via patch.
    pub neighborhood: String,
    /// City (localidade).
    pub locality: String,
    /// Two-letter state code (UF).
    pub state_code: String,
    /// Full state name.
    pub state_name: String,
    /// Macro-region name.
    pub region: String,
    /// IBGE municipality code.
    pub ibge: Option<String>,
    /// GIA registry code.
    pub gia: Option<String>,
    /// Telephone area code (DDD).
    pub area_code: Option<String>,
    /// SIAFI institution code.
    pub siafi: Option<String>,
    /// Favourite flag; defaults to false on creation.
    pub is_favorite: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a record; identity and timestamps are
/// generated by the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCepRecord {
    /// Canonical postal code to store.
    pub code: CepCode,
    /// Street name.
    pub street: String,
    /// Address complement.
    pub complement: Option<String>,
    /// Unit designator.
    pub unit: Option<String>,
    /// Neighbourhood.
    pub neighborhood: String,
    /// City.
    pub locality: String,
    /// Two-letter state code.
    pub state_code: String,
    /// Full state name.
    pub state_name: String,
    /// Macro-region name.
    pub region: String,
    /// IBGE municipality code.
    pub ibge: Option<String>,
    /// GIA registry code.
    pub gia: Option<String>,
    /// Telephone area code.
    pub area_code: Option<String>,
    /// SIAFI institution code.
    pub siafi: Option<String>,
}

/// Partial update applied to a cached record.
///
/// Only the neighbourhood and street are mutable after creation. Blank
/// strings are normalised away so "provided but empty" behaves like absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CepPatch {
    /// Replacement neighbourhood, when provided.
    pub neighborhood: Option<String>,
    /// Replacement street, when provided.
    pub street: Option<String>,
}

impl CepPatch {
    /// Build a patch, discarding fields that are absent or blank.
    pub fn new(neighborhood: Option<String>, street: Option<String>) -> Self {
        Self {
            neighborhood: neighborhood.filter(|value| !value.trim().is_empty()),
            street: street.filter(|value| !value.trim().is_empty()),
        }
    }

    /// True when the patch carries nothing to update.
    pub fn is_empty(&self) -> bool {
        self.neighborhood.is_none() && self.street.is_none()
    }
}
