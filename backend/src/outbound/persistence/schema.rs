//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations/`
//! exactly; `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// Cached postal-code records.
    ///
    /// One row per canonical code; the unique index on `code` arbitrates
    /// concurrent first-time lookups.
    ceps (id) {
        /// Primary key: UUID v4 generated at creation.
        id -> Uuid,
        /// Canonical code, `NNNNN-NNN`; unique natural key.
        #[max_length = 9]
        code -> Varchar,
        /// Street name (logradouro).
        street -> Text,
        /// Address complement, when present.
        complement -> Nullable<Text>,
        /// Unit designator, when present.
        unit -> Nullable<Text>,
        /// Neighbourhood (bairro).
        neighborhood -> Text,
        /// City (localidade).
        locality -> Text,
        /// Two-letter state code (UF).
        #[max_length = 2]
        state_code -> Varchar,
        /// Full state name.
        state_name -> Text,
        /// Macro-region name.
        region -> Text,
        /// IBGE municipality code.
        ibge -> Nullable<Text>,
        /// GIA registry code.
        gia -> Nullable<Text>,
        /// Telephone area code (DDD).
        #[max_length = 2]
        area_code -> Nullable<Varchar>,
        /// SIAFI institution code.
        siafi -> Nullable<Text>,
        /// Favourite flag, defaults to false.
        is_favorite -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
