//! Repository layer for book persistence

pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, NewBook, UpdateBook},
};

pub use books::PgBookStore;
pub use memory::InMemoryBookStore;

/// Storage for book records, keyed by the system-generated id.
///
/// Every method fails with `AppError::NotFound` when no record carries the
/// given id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new record under a freshly generated id
    async fn create(&self, data: &NewBook) -> AppResult<Book>;

    /// All records in storage (insertion) order
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Book>;

    /// Replace the fields named in `data`, returning the stored result
    async fn update_by_id(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book>;

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()>;
}

/// Main repository struct holding the storage handles
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self::with_books(Arc::new(PgBookStore::new(pool)))
    }

    /// Create a repository over an arbitrary book store
    pub fn with_books(books: Arc<dyn BookStore>) -> Self {
        Self { books }
    }
}
