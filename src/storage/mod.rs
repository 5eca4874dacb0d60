pub mod postgres;
pub mod repository;

pub use postgres::{Column, PgRecord, PgRepository, PgUnitOfWork};
pub use repository::{Repository, RepositoryError, RepositoryResult, UnitOfWork};
