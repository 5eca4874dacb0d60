//! PostgreSQL repository implementation, generic over the entity table.
//!
//! Every entity maps to one table with a `SERIAL` primary key named `id`.
//! Per-entity knowledge (table name, writable columns, how to bind them) lives
//! in `PgRecord`; the statements themselves are shared.

use crate::domain::model::{Author, Book, Entity};
use crate::storage::repository::{Repository, RepositoryError, RepositoryResult, UnitOfWork};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use std::marker::PhantomData;

/// A single bindable column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(Option<String>),
    Int(Option<i32>),
    Float(Option<f64>),
}

/// Table metadata for an entity stored in PostgreSQL.
pub trait PgRecord: Entity + for<'r> FromRow<'r, PgRow> {
    const TABLE: &'static str;

    /// Writable columns (everything except `id`), in the order `values` returns them.
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<Column>;
}

impl PgRecord for Author {
    const TABLE: &'static str = "authors";
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name", "bio"];

    fn values(&self) -> Vec<Column> {
        vec![
            Column::Text(Some(self.first_name.clone())),
            Column::Text(Some(self.last_name.clone())),
            Column::Text(self.bio.clone()),
        ]
    }
}

impl PgRecord for Book {
    const TABLE: &'static str = "books";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "year",
        "isbn",
        "summary",
        "image",
        "price",
        "author_id",
    ];

    fn values(&self) -> Vec<Column> {
        vec![
            Column::Text(Some(self.title.clone())),
            Column::Int(self.year),
            Column::Text(Some(self.isbn.clone())),
            Column::Text(self.summary.clone()),
            Column::Text(self.image.clone()),
            Column::Float(self.price),
            Column::Int(self.author_id),
        ]
    }
}

fn push_column(qb: &mut QueryBuilder<'static, Postgres>, value: Column) {
    match value {
        Column::Text(v) => qb.push_bind(v),
        Column::Int(v) => qb.push_bind(v),
        Column::Float(v) => qb.push_bind(v),
    };
}

/// `INSERT INTO <table> (<columns>) VALUES (..) RETURNING id`
pub(crate) fn insert_query<E: PgRecord>(entity: &E) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("INSERT INTO ");
    qb.push(E::TABLE)
        .push(" (")
        .push(E::COLUMNS.join(", "))
        .push(") VALUES (");
    for (idx, value) in entity.values().into_iter().enumerate() {
        if idx > 0 {
            qb.push(", ");
        }
        push_column(&mut qb, value);
    }
    qb.push(") RETURNING id");
    qb
}

/// Full-row replace: every writable column is overwritten, including NULLs.
pub(crate) fn update_query<E: PgRecord>(entity: &E) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE ");
    qb.push(E::TABLE).push(" SET ");
    for (idx, (column, value)) in E::COLUMNS.iter().zip(entity.values()).enumerate() {
        if idx > 0 {
            qb.push(", ");
        }
        qb.push(column).push(" = ");
        push_column(&mut qb, value);
    }
    qb.push(" WHERE id = ").push_bind(entity.id());
    qb
}

/// Repository over one entity table.
#[derive(Clone)]
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgRecord> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: PgRecord> Repository<E> for PgRepository<E> {
    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        let sql = format!("SELECT * FROM {} ORDER BY id", E::TABLE);
        let records = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(records)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<E>> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);
        let record = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", E::TABLE);
        let found: bool = sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }

    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork<E>>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgUnitOfWork::<E>::new(tx)))
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Unit of work backed by one SQL transaction.
pub struct PgUnitOfWork<E> {
    tx: Option<Transaction<'static, Postgres>>,
    affected: u64,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgRecord> PgUnitOfWork<E> {
    fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Some(tx),
            affected: 0,
            _entity: PhantomData,
        }
    }

    fn transaction(&mut self) -> RepositoryResult<&mut Transaction<'static, Postgres>> {
        self.tx.as_mut().ok_or(RepositoryError::AlreadySaved)
    }
}

#[async_trait]
impl<E: PgRecord> UnitOfWork<E> for PgUnitOfWork<E> {
    async fn create(&mut self, entity: &mut E) -> RepositoryResult<bool> {
        let mut qb = insert_query(&*entity);
        let tx = self.transaction()?;
        let id: i32 = qb.build_query_scalar::<i32>().fetch_one(&mut **tx).await?;
        entity.set_id(id);
        self.affected += 1;
        Ok(true)
    }

    async fn update(&mut self, entity: &E) -> RepositoryResult<bool> {
        let mut qb = update_query(entity);
        let tx = self.transaction()?;
        let rows = qb.build().execute(&mut **tx).await?.rows_affected();
        self.affected += rows;
        Ok(rows > 0)
    }

    async fn delete(&mut self, entity: &E) -> RepositoryResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let tx = self.transaction()?;
        let rows = sqlx::query(&sql)
            .bind(entity.id())
            .execute(&mut **tx)
            .await?
            .rows_affected();
        self.affected += rows;
        Ok(rows > 0)
    }

    async fn save(&mut self) -> RepositoryResult<bool> {
        let tx = self.tx.take().ok_or(RepositoryError::AlreadySaved)?;
        tx.commit().await?;
        Ok(self.affected > 0)
    }
}
