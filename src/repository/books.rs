//! PostgreSQL book store

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook, UpdateBook},
};

const BOOK_COLUMNS: &str = "id, identifier, author_name, title_text, subtitle, part_number, \
    publisher_name, city_of_publication, publishing_date, edition_number, price_amount, \
    currency_code, territory, language, pages";

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

/// `UPDATE` statement for the fields named in `data`, or `None` when there
/// is nothing to set
fn build_update(id: Uuid, data: &UpdateBook) -> Option<QueryBuilder<'static, Postgres>> {
    let mut builder = QueryBuilder::new("UPDATE books SET ");
    let mut touched = false;

    {
        let mut sets = builder.separated(", ");

        macro_rules! set_field {
            ($field:ident) => {
                if let Some(val) = &data.$field {
                    sets.push(concat!(stringify!($field), " = "));
                    sets.push_bind_unseparated(val.clone());
                    touched = true;
                }
            };
        }

        set_field!(identifier);
        set_field!(author_name);
        set_field!(title_text);
        set_field!(subtitle);
        set_field!(part_number);
        set_field!(publisher_name);
        set_field!(city_of_publication);
        set_field!(publishing_date);
        set_field!(edition_number);
        set_field!(price_amount);
        set_field!(currency_code);
        set_field!(territory);
        set_field!(language);
        set_field!(pages);
    }

    if !touched {
        return None;
    }

    builder
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(BOOK_COLUMNS);
    Some(builder)
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, data: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO books (
                id, identifier, author_name, title_text, subtitle, part_number,
                publisher_name, city_of_publication, publishing_date, edition_number,
                price_amount, currency_code, territory, language, pages
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        let row = sqlx::query_as::<_, Book>(&query)
            .bind(Uuid::new_v4())
            .bind(&data.identifier)
            .bind(&data.author_name)
            .bind(&data.title_text)
            .bind(&data.subtitle)
            .bind(&data.part_number)
            .bind(&data.publisher_name)
            .bind(&data.city_of_publication)
            .bind(data.publishing_date)
            .bind(data.edition_number)
            .bind(data.price_amount)
            .bind(&data.currency_code)
            .bind(&data.territory)
            .bind(&data.language)
            .bind(data.pages)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM books ORDER BY created_at, id", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Book> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn update_by_id(&self, id: Uuid, data: &UpdateBook) -> AppResult<Book> {
        let Some(mut builder) = build_update(id, data) else {
            return self.find_by_id(id).await;
        };

        builder
            .build_query_as::<Book>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
