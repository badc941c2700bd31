//! Error types for the catalog server

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::views;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl AppError {
    /// Status code of the error view.
    ///
    /// Every failure is reported as 500; not-found and validation failures are
    /// not told apart at the HTTP level.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(e) => AppError::Unavailable(e.to_string()),
            sqlx::Error::PoolTimedOut => AppError::Unavailable("connection pool timed out".to_string()),
            sqlx::Error::PoolClosed => AppError::Unavailable("connection pool closed".to_string()),
            other => AppError::Database(other),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        messages.dedup();
        AppError::Validation(messages.join("; "))
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Unavailable(msg) => {
                tracing::error!("Database unavailable: {}", msg);
                self.to_string()
            }
            AppError::Render(e) => {
                tracing::error!("Template error: {:?}", e);
                self.to_string()
            }
            other => {
                tracing::warn!("Request failed: {}", other);
                other.to_string()
            }
        };

        views::error_page(self.status_code(), &message)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_renders_error_view_with_500() {
        let response = AppError::NotFound("Book 42 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert!(body.contains("500"));
        assert!(body.contains("Book 42 not found"));
    }

    #[tokio::test]
    async fn test_validation_is_not_segregated() {
        let response = AppError::Validation("authorName is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(response).await.contains("authorName is required"));
    }

    #[tokio::test]
    async fn test_database_details_are_hidden() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        let body = body_of(response).await;
        assert!(body.contains("Database error"));
        assert!(!body.contains("RowNotFound"));
    }

    #[test]
    fn test_pool_errors_map_to_unavailable() {
        assert!(matches!(AppError::from(sqlx::Error::PoolTimedOut), AppError::Unavailable(_)));
        assert!(matches!(AppError::from(sqlx::Error::PoolClosed), AppError::Unavailable(_)));
        assert!(matches!(AppError::from(sqlx::Error::RowNotFound), AppError::Database(_)));
    }
}
