pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::DatabaseService;
pub use domain::model::{Author, Book, Entity};
pub use storage::{PgRepository, Repository, RepositoryError, UnitOfWork};
