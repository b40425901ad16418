//! Show listing and booking

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use showbook_common::db::{artists, shows, venues};
use showbook_common::forms::{parse_show, FormData};

use super::failure_message;
use crate::error::WebResult;
use crate::flash::{self, Flash};
use crate::ui;
use crate::AppState;

/// GET /shows
pub async fn list_shows(
    State(state): State<AppState>,
    jar: CookieJar,
) -> WebResult<(CookieJar, Html<String>)> {
    let (jar, flash) = flash::take(jar);
    let listing = shows::list_shows(&state.db).await?;
    Ok((jar, Html(ui::shows::shows_page(&listing, flash.as_ref()))))
}

/// GET /shows/create
///
/// The form offers every venue and artist as a choice.
pub async fn create_show_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> WebResult<(CookieJar, Html<String>)> {
    let (jar, flash) = flash::take(jar);
    let venue_choices = venues::venue_choices(&state.db).await?;
    let artist_choices = artists::artist_choices(&state.db).await?;
    Ok((
        jar,
        Html(ui::forms::show_form(
            &venue_choices,
            &artist_choices,
            flash.as_ref(),
        )),
    ))
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<(CookieJar, Redirect)> {
    let form = FormData::from(pairs);

    let outcome = match parse_show(&form) {
        Ok(fields) => shows::create_show(&state.db, &fields).await.map(|_| ()),
        Err(e) => Err(e),
    };

    let message = match outcome {
        Ok(()) => Flash::info("Show successfully listed!"),
        Err(e) => Flash::error(failure_message(
            "ERROR: Show could not be listed!".to_string(),
            &e,
        )),
    };

    Ok((flash::set(jar, message), Redirect::to("/")))
}

pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
}
