//! HTTP routes for the catalog pages

pub mod books;
pub mod method_override;

use axum::{extract::Request, routing::get, Router};
use tower::{util::MapRequest, Layer};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::AppState;

/// Directory served for any path no route matches
pub const PUBLIC_DIR: &str = "public";

/// Router with verb override applied ahead of routing
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(books::home))
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/new", get(books::new_book))
        .route(
            "/books/:id",
            get(books::show_book)
                .put(books::update_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        .route("/books/:id/edit", get(books::edit_book))
        .fallback_service(ServeDir::new(PUBLIC_DIR))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap the router so overridden form submissions reach their PUT/DELETE routes
pub fn app(state: AppState) -> App {
    let override_method: fn(Request) -> Request = method_override::override_method;
    tower::util::MapRequestLayer::new(override_method).layer(router(state))
}
