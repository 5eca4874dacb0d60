//! Database bootstrap for the bookstore service.
//!
//! Owns the connection pool, makes sure the `authors` and `books` tables
//! exist, and hands out one repository per entity.

use crate::domain::model::{Author, Book};
use crate::infra::config;
use crate::storage::PgRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Tables managed by this service, in creation order (books reference authors).
pub const MANAGED_TABLES: &[&str] = &["authors", "books"];

const CREATE_AUTHORS_SQL: &str = "CREATE TABLE IF NOT EXISTS authors (
    id SERIAL PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    bio TEXT
)";

const CREATE_BOOKS_SQL: &str = "CREATE TABLE IF NOT EXISTS books (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    year INTEGER,
    isbn TEXT NOT NULL,
    summary TEXT,
    image TEXT,
    price DOUBLE PRECISION,
    author_id INTEGER NULL REFERENCES authors(id) ON DELETE SET NULL
)";

pub struct DatabaseService {
    pool: PgPool,
}

impl DatabaseService {
    /// Connects using `DATABASE_URL` / `DB_MAX_CONNECTIONS` and ensures the schema.
    pub async fn new() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let database_url = config::database_url()?;
        let max_connections = config::db_max_connections()?;

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(&database_url)
            .await?;
        info!(max_connections, "Connected to Postgres");

        let service = Self { pool };
        service.ensure_schema().await?;
        Ok(service)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the entity tables if they are missing. Safe to call repeatedly.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_AUTHORS_SQL).execute(&self.pool).await?;
        sqlx::query(CREATE_BOOKS_SQL).execute(&self.pool).await?;
        info!(tables = ?MANAGED_TABLES, "Schema ready");
        Ok(())
    }

    pub fn authors(&self) -> PgRepository<Author> {
        PgRepository::new(self.pool.clone())
    }

    pub fn books(&self) -> PgRepository<Book> {
        PgRepository::new(self.pool.clone())
    }
}
