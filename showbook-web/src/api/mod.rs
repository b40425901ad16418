//! HTTP handlers for showbook-web

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, Uri},
};
use showbook_common::Error;
use tracing::{debug, warn};

use crate::error::WebError;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::home_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

/// Fallback for unmatched paths
pub async fn not_found(uri: Uri) -> WebError {
    WebError::NoRoute(uri.path().to_string())
}

/// Numeric `:id` path segment
///
/// An id that does not parse means no such entity, so the rejection is the
/// HTML 404 page rather than axum's plain-text 400.
pub struct EntityId(pub i64);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for EntityId {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(EntityId(id)),
            Err(rejection) => {
                debug!("Bad id in {}: {}", parts.uri.path(), rejection);
                Err(WebError::NoRoute(parts.uri.path().to_string()))
            }
        }
    }
}

/// Error flash text for a failed command
///
/// Validation failures name the offending field; database failures are
/// logged and kept out of the message.
pub(crate) fn failure_message(headline: String, err: &Error) -> String {
    match err {
        Error::Validation { .. } => format!("{} {}", headline, err),
        _ => {
            warn!("{}: {}", headline, err);
            headline
        }
    }
}
