//! Catalog management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{parse_book_id, Book, NewBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book after checking required fields and applying defaults.
    /// Nothing is stored when validation fails.
    pub async fn create_book(&self, data: NewBook) -> AppResult<Book> {
        data.validate()?;
        let data = data.with_defaults().with_rounded_price();
        let book = self.repository.books.create(&data).await?;
        tracing::info!("Stored new book {} as {}", book.title_text, book.id);
        Ok(book)
    }

    /// List every book in storage order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        let books = self.repository.books.find_all().await?;
        tracing::info!("Retrieved all books ({})", books.len());
        Ok(books)
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        let id = parse_book_id(id)?;
        let book = self.repository.books.find_by_id(id).await?;
        tracing::info!("Retrieved book {} as {}", book.title_text, book.id);
        Ok(book)
    }

    /// Partial update; required fields are not re-checked here
    pub async fn update_book(&self, id: &str, data: &UpdateBook) -> AppResult<Book> {
        let id = parse_book_id(id)?;
        let data = data.clone().with_rounded_price();
        let book = self.repository.books.update_by_id(id, &data).await?;
        tracing::info!("Updated book {} as {}", book.title_text, book.id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        let id = parse_book_id(id)?;
        self.repository.books.delete_by_id(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}
