//! HTTP error mapping for page handlers
//!
//! Lookups that miss render the 404 page; every other failure is logged and
//! renders the 500 page. Command handlers turn validation and database
//! failures into a flash message themselves, so only read paths and
//! not-found commands reach this type.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::ui;

/// Page handler error
#[derive(Debug, Error)]
pub enum WebError {
    /// No route matched (404)
    #[error("No page at {0}")]
    NoRoute(String),

    /// showbook-common error; `NotFound` becomes 404, the rest 500
    #[error(transparent)]
    Common(#[from] showbook_common::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NoRoute(_) => not_found_response(),
            WebError::Common(ref err) if err.is_not_found() => not_found_response(),
            WebError::Common(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(ui::errors::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}

fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Html(ui::errors::not_found_page())).into_response()
}

/// Result type for page handlers
pub type WebResult<T> = Result<T, WebError>;
