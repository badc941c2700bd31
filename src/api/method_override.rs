//! HTTP verb override for HTML forms.
//!
//! Browsers only submit forms with GET and POST. A POST carrying
//! `?_method=PUT` (or `DELETE`, `PATCH`), or the `X-HTTP-Method-Override`
//! header, is rewritten to that verb. The rewrite has to happen before routing,
//! so this wraps the whole `Router` instead of being a route layer.

use axum::{
    extract::{Query, Request},
    http::{HeaderName, Method},
};
use serde::Deserialize;

pub static OVERRIDE_HEADER: HeaderName = HeaderName::from_static("x-http-method-override");

#[derive(Debug, Deserialize)]
struct OverrideQuery {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Rewrite the method of an overridden POST request
pub fn override_method(mut request: Request) -> Request {
    if request.method() != Method::POST {
        return request;
    }

    let requested = request
        .headers()
        .get(&OVERRIDE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| {
            Query::<OverrideQuery>::try_from_uri(request.uri())
                .ok()
                .and_then(|Query(query)| query.method)
        });

    if let Some(method) = requested.as_deref().and_then(parse_override) {
        tracing::debug!("{} {} overridden as {}", request.method(), request.uri().path(), method);
        *request.method_mut() = method;
    }
    request
}

fn parse_override(value: &str) -> Option<Method> {
    match value.trim().to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        "PATCH" => Some(Method::PATCH),
        _ => None,
    }
}
