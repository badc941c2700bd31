//! HTML views
//!
//! Templates are embedded at compile time and rendered with minijinja.
//! HTML auto-escaping is on for every `.html` template.

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("error.html", include_str!("../templates/error.html")),
    ("books/index.html", include_str!("../templates/books/index.html")),
    ("books/show.html", include_str!("../templates/books/show.html")),
    ("books/new.html", include_str!("../templates/books/new.html")),
    ("books/edit.html", include_str!("../templates/books/edit.html")),
];

static ENVIRONMENT: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)
            .unwrap_or_else(|e| panic!("invalid template {}: {}", name, e));
    }
    env
});

/// Render a template with the given context
pub fn render<S: Serialize>(name: &str, ctx: S) -> AppResult<Html<String>> {
    let template = ENVIRONMENT.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

/// Render the error view; the response status is `status`.
pub fn error_page(status: StatusCode, msg: &str) -> Response {
    match render("error.html", context! { code => status.as_u16(), msg => msg }) {
        Ok(html) => (status, html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error view: {}", e);
            (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("{} {}", status.as_u16(), msg),
            )
                .into_response()
        }
    }
}
