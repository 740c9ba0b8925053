//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Concrete implementation of the [`crate::domain::ports::CepRepository`]
//! port, backed by PostgreSQL via `diesel-async` with `bb8` pooling. Row
//! structs and table definitions stay internal; the domain only sees
//! [`crate::domain::CepRecord`] and typed persistence errors.

mod diesel_cep_repository;
mod models;
mod pool;
mod schema;

pub use diesel_cep_repository::DieselCepRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
