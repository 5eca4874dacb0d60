//! Shared fixtures: in-memory repositories and an in-process server.

#![allow(dead_code)]

use async_trait::async_trait;
use bookstore_api::storage::RepositoryResult;
use bookstore_api::transport;
use bookstore_api::{Author, Book, Entity, Repository, RepositoryError, UnitOfWork};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

struct Table<E> {
    rows: BTreeMap<i32, E>,
    next_id: i32,
}

/// Repository backed by a map. Writes become visible on `save`, like a transaction.
pub struct InMemoryRepository<E> {
    table: Arc<Mutex<Table<E>>>,
    refuse_writes: bool,
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            refuse_writes: self.refuse_writes,
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 0,
            })),
            refuse_writes: false,
        }
    }

    /// Every write reports "no row affected".
    pub fn refusing_writes() -> Self {
        Self {
            refuse_writes: true,
            ..Self::new()
        }
    }

    /// Stores a record directly, assigning the next id.
    pub fn seed(&self, mut entity: E) -> E {
        let mut table = self.table.lock().unwrap();
        table.next_id += 1;
        entity.set_id(table.next_id);
        table.rows.insert(entity.id(), entity.clone());
        entity
    }

    pub fn get(&self, id: i32) -> Option<E> {
        self.table.lock().unwrap().rows.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.table.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        Ok(self.table.lock().unwrap().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<E>> {
        Ok(self.get(id))
    }

    async fn exists(&self, id: i32) -> RepositoryResult<bool> {
        Ok(self.table.lock().unwrap().rows.contains_key(&id))
    }

    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork<E>>> {
        Ok(Box::new(InMemoryUnitOfWork {
            repo: self.clone(),
            staged: Vec::new(),
            saved: false,
        }))
    }

    async fn ping(&self) -> RepositoryResult<()> {
        // A poisoned lock is the in-memory analogue of a dead connection.
        if self.table.is_poisoned() {
            return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

enum Staged<E> {
    Put(E),
    Remove(i32),
}

struct InMemoryUnitOfWork<E> {
    repo: InMemoryRepository<E>,
    staged: Vec<Staged<E>>,
    saved: bool,
}

#[async_trait]
impl<E: Entity> UnitOfWork<E> for InMemoryUnitOfWork<E> {
    async fn create(&mut self, entity: &mut E) -> RepositoryResult<bool> {
        if self.repo.refuse_writes {
            return Ok(false);
        }
        let id = {
            let mut table = self.repo.table.lock().unwrap();
            table.next_id += 1;
            table.next_id
        };
        entity.set_id(id);
        self.staged.push(Staged::Put(entity.clone()));
        Ok(true)
    }

    async fn update(&mut self, entity: &E) -> RepositoryResult<bool> {
        if self.repo.refuse_writes || !self.repo.exists(entity.id()).await? {
            return Ok(false);
        }
        self.staged.push(Staged::Put(entity.clone()));
        Ok(true)
    }

    async fn delete(&mut self, entity: &E) -> RepositoryResult<bool> {
        if self.repo.refuse_writes || !self.repo.exists(entity.id()).await? {
            return Ok(false);
        }
        self.staged.push(Staged::Remove(entity.id()));
        Ok(true)
    }

    async fn save(&mut self) -> RepositoryResult<bool> {
        if self.saved {
            return Err(RepositoryError::AlreadySaved);
        }
        self.saved = true;
        let changed = !self.staged.is_empty();
        let mut table = self.repo.table.lock().unwrap();
        for change in self.staged.drain(..) {
            match change {
                Staged::Put(entity) => {
                    table.rows.insert(entity.id(), entity);
                }
                Staged::Remove(id) => {
                    table.rows.remove(&id);
                }
            }
        }
        Ok(changed)
    }
}

/// Repository whose every call fails like an unreachable database.
pub struct FailingRepository;

fn unreachable_db() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl<E: Entity> Repository<E> for FailingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        Err(unreachable_db())
    }

    async fn find_by_id(&self, _id: i32) -> RepositoryResult<Option<E>> {
        Err(unreachable_db())
    }

    async fn exists(&self, _id: i32) -> RepositoryResult<bool> {
        Err(unreachable_db())
    }

    async fn begin(&self) -> RepositoryResult<Box<dyn UnitOfWork<E>>> {
        Err(unreachable_db())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Err(unreachable_db())
    }
}

pub struct Stores {
    pub authors: InMemoryRepository<Author>,
    pub books: InMemoryRepository<Book>,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            authors: InMemoryRepository::new(),
            books: InMemoryRepository::new(),
        }
    }

    pub fn app_state(&self) -> transport::http::AppState {
        transport::http::AppState {
            authors: Arc::new(self.authors.clone()),
            books: Arc::new(self.books.clone()),
        }
    }
}

/// Starts the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(state: transport::http::AppState) -> String {
    let router = transport::http::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

pub fn author(first_name: &str, last_name: &str) -> Author {
    Author {
        id: 0,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        bio: None,
    }
}

pub fn book(title: &str, author_id: Option<i32>) -> Book {
    Book {
        id: 0,
        title: title.to_string(),
        year: Some(1965),
        isbn: "9780441013593".to_string(),
        summary: None,
        image: None,
        price: Some(9.99),
        author_id,
    }
}
