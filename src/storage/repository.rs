//! Repository contract shared by every entity.

use crate::domain::model::Entity;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unit of work was already saved")]
    AlreadySaved,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read access to one entity table plus the entry point for writes.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Returns every record, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<E>>;

    /// Returns `None` when no record has the given id.
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<E>>;

    async fn exists(&self, id: i32) -> RepositoryResult<bool>;

    /// Opens a unit of work. Changes staged on it are only visible to other
    /// readers after `UnitOfWork::save` returns.
    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork<E>>>;

    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> RepositoryResult<()>;
}

/// A single write transaction over one entity table.
///
/// Dropping a unit of work without calling `save` discards the staged changes.
#[async_trait]
pub trait UnitOfWork<E: Entity>: Send {
    /// Inserts a new record and writes the store-assigned id back into `entity`.
    async fn create(&mut self, entity: &mut E) -> RepositoryResult<bool>;

    /// Replaces every column of the record matched by `entity.id()`.
    async fn update(&mut self, entity: &E) -> RepositoryResult<bool>;

    async fn delete(&mut self, entity: &E) -> RepositoryResult<bool>;

    /// Commits the staged changes. Returns `false` when no row was affected.
    async fn save(&mut self) -> RepositoryResult<bool>;
}
