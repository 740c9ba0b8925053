//! PostgreSQL-backed `CepRepository` implementation using Diesel ORM.
//!
//! A thin adapter: it translates between Diesel rows and domain records and
//! maps database failures into [`CepPersistenceError`] variants. The unique
//! index on `code` is surfaced as `DuplicateCode` so the service can
//! converge concurrent first-time lookups. No business logic lives here.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CepPersistenceError, CepRepository};
use crate::domain::{CepCode, CepPatch, CepRecord, NewCepRecord};

use super::models::{CepPatchChangeset, CepRow, FavoriteChangeset, NewCepRow};
use super::pool::{DbPool, PoolError};
use super::schema::ceps;

/// Diesel-backed implementation of the record store port.
#[derive(Clone)]
pub struct DieselCepRepository {
    pool: DbPool,
}

impl DieselCepRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> CepPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CepPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors.
///
/// Unique violations become [`CepPersistenceError::DuplicateCode`] carrying
/// the offending code; other database failures collapse into query or
/// connection errors with the detail kept in logs, not in the variant.
fn map_diesel_error(error: diesel::result::Error, code: &str) -> CepPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            CepPersistenceError::duplicate_code(code)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CepPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => CepPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => CepPersistenceError::query("database query error"),
        _ => CepPersistenceError::query("database error"),
    }
}

/// Convert a fetched row, mapping conversion failures to query errors.
fn row_to_record(row: CepRow) -> Result<CepRecord, CepPersistenceError> {
    row.into_record().map_err(CepPersistenceError::query)
}

#[async_trait]
impl CepRepository for DieselCepRepository {
    async fn find_by_code(
        &self,
        code: &CepCode,
    ) -> Result<Option<CepRecord>, CepPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CepRow> = ceps::table
            .filter(ceps::code.eq(code.as_str()))
            .select(CepRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, code.as_str()))?;

        row.map(row_to_record).transpose()
    }

    async fn list_all(&self) -> Result<Vec<CepRecord>, CepPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CepRow> = ceps::table
            .select(CepRow::as_select())
            .order_by(ceps::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ""))?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn create(&self, record: NewCepRecord) -> Result<CepRecord, CepPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCepRow::from_record(record);
        let code = new_row.code.clone();
        let row: CepRow = diesel::insert_into(ceps::table)
            .values(&new_row)
            .returning(CepRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, &code))?;

        row_to_record(row)
    }

    async fn apply_patch(
        &self,
        code: &CepCode,
        patch: &CepPatch,
    ) -> Result<Option<CepRecord>, CepPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CepRow> = diesel::update(ceps::table)
            .filter(ceps::code.eq(code.as_str()))
            .set(&CepPatchChangeset::from_patch(patch))
            .returning(CepRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, code.as_str()))?;

        row.map(row_to_record).transpose()
    }

    async fn set_favorite(
        &self,
        code: &CepCode,
        favorite: bool,
    ) -> Result<Option<CepRecord>, CepPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CepRow> = diesel::update(ceps::table)
            .filter(ceps::code.eq(code.as_str()))
            .set(&FavoriteChangeset::new(favorite))
            .returning(CepRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, code.as_str()))?;

        row.map(row_to_record).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Error-mapping coverage; query execution is exercised against a live
    //! database in deployment environments.

    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

    use super::*;

    struct StubErrorInfo(&'static str);

    impl DatabaseErrorInformation for StubErrorInfo {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("ceps")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some("ceps_code_key")
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn unique_violation_maps_to_duplicate_code() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(StubErrorInfo("duplicate key value violates unique constraint")),
        );

        assert_eq!(
            map_diesel_error(error, "01310-100"),
            CepPersistenceError::duplicate_code("01310-100")
        );
    }

    #[test]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(StubErrorInfo("server closed the connection unexpectedly")),
        );

        assert!(matches!(
            map_diesel_error(error, "01310-100"),
            CepPersistenceError::Connection { .. }
        ));
    }

    #[test]
    fn other_database_failures_map_to_query_errors() {
        assert!(matches!(
            map_diesel_error(DieselError::NotFound, "01310-100"),
            CepPersistenceError::Query { .. }
        ));
    }

    #[test]
    fn pool_failures_map_to_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out waiting for connection"));
        assert!(matches!(mapped, CepPersistenceError::Connection { .. }));
    }
}
