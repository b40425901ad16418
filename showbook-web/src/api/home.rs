//! Landing page

use axum::{extract::State, response::Html, routing::get, Router};
use axum_extra::extract::cookie::CookieJar;
use showbook_common::db::{artists, shows, venues};

use crate::error::WebResult;
use crate::ui::home::{home_page, Totals};
use crate::{flash, AppState};

/// GET /
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> WebResult<(CookieJar, Html<String>)> {
    let (jar, flash) = flash::take(jar);

    let totals = Totals {
        venues: venues::count_venues(&state.db).await?,
        artists: artists::count_artists(&state.db).await?,
        shows: shows::count_shows(&state.db).await?,
    };

    Ok((jar, Html(home_page(totals, flash.as_ref()))))
}

pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
