//! Book pages

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::WithRejection;
use minijinja::context;

use crate::{
    error::{AppError, AppResult},
    models::book::{NewBook, UpdateBook},
    views, AppState,
};

/// Homepage, sends visitors to the listing
pub async fn home() -> Redirect {
    Redirect::to("/books")
}

/// Creation form
pub async fn new_book() -> AppResult<Html<String>> {
    views::render("books/new.html", context! {})
}

/// Create a book, then show it
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Form(data), _): WithRejection<Form<NewBook>, AppError>,
) -> AppResult<Redirect> {
    let book = state.services.catalog.create_book(data).await?;
    Ok(Redirect::to(&format!("/books/{}", book.id)))
}

/// List all books
pub async fn list_books(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.catalog.list_books().await?;
    views::render("books/index.html", context! { books => books })
}

/// Book detail page
pub async fn show_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.get_book(&id).await?;
    views::render("books/show.html", context! { book => book })
}

/// Edit form, pre-filled
pub async fn edit_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.get_book(&id).await?;
    views::render("books/edit.html", context! { book => book })
}

/// Update a book, then show it
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Form(data), _): WithRejection<Form<UpdateBook>, AppError>,
) -> AppResult<Redirect> {
    let book = state.services.catalog.update_book(&id, &data).await?;
    Ok(Redirect::to(&format!("/books/{}", book.id)))
}

/// Delete a book, then go back to the listing
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    state.services.catalog.delete_book(&id).await?;
    Ok(Redirect::to("/books"))
}
