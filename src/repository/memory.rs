//! Process-local book store, no database involved

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook, UpdateBook},
};

#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let book = Book::from_new(Uuid::new_v4(), data.clone());
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update_by_id(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| not_found(id))?;
        data.apply(book);
        Ok(book.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let mut books = self.books.write().await;
        let position = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| not_found(id))?;
        books.remove(position);
        Ok(())
    }
}
