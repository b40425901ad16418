//! Venue pages and commands

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use showbook_common::db::venues;
use showbook_common::forms::{parse_venue, FormData};
use showbook_common::time;

use super::{failure_message, EntityId};
use crate::error::WebResult;
use crate::flash::{self, Flash};
use crate::ui;
use crate::AppState;

type Page = WebResult<(CookieJar, Html<String>)>;
type Command = WebResult<(CookieJar, Redirect)>;

/// GET /venues
pub async fn list_venues(State(state): State<AppState>, jar: CookieJar) -> Page {
    let (jar, flash) = flash::take(jar);
    let areas = venues::list_venue_areas(&state.db, time::now()).await?;
    Ok((jar, Html(ui::venues::venues_page(&areas, flash.as_ref()))))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Page {
    let (jar, flash) = flash::take(jar);
    let form = FormData::from(pairs);
    let term = form.get("search_term").unwrap_or_default().trim().to_string();

    let results = venues::search_venues(&state.db, &term, time::now()).await?;
    Ok((
        jar,
        Html(ui::venues::venue_search_page(&term, &results, flash.as_ref())),
    ))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Page {
    let (jar, flash) = flash::take(jar);
    let detail = venues::venue_detail(&state.db, id, time::now()).await?;
    Ok((jar, Html(ui::venues::venue_page(&detail, flash.as_ref()))))
}

/// GET /venues/create
pub async fn create_venue_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take(jar);
    (jar, Html(ui::forms::venue_form(None, flash.as_ref())))
}

/// POST /venues/create
///
/// Success and failure both flash a message and return to the landing page.
pub async fn create_venue_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Command {
    let form = FormData::from(pairs);
    let name = form.get("name").unwrap_or_default().trim().to_string();

    let outcome = match parse_venue(&form) {
        Ok(fields) => venues::create_venue(&state.db, &fields).await.map(|_| ()),
        Err(e) => Err(e),
    };

    let message = match outcome {
        Ok(()) => Flash::info(format!("Venue {} successfully listed!", name)),
        Err(e) => Flash::error(failure_message(
            format!("ERROR: Venue {} could not be listed!", name),
            &e,
        )),
    };

    Ok((flash::set(jar, message), Redirect::to("/")))
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Page {
    let (jar, flash) = flash::take(jar);
    let venue = venues::get_venue(&state.db, id).await?;
    Ok((jar, Html(ui::forms::venue_form(Some(&venue), flash.as_ref()))))
}

/// POST /venues/:id/edit
///
/// An unknown id renders the 404 page; other failures flash and return to
/// the venue page.
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Command {
    // Missing id wins over a bad form
    venues::get_venue(&state.db, id).await?;

    let form = FormData::from(pairs);
    let name = form.get("name").unwrap_or_default().trim().to_string();

    let outcome = match parse_venue(&form) {
        Ok(fields) => venues::update_venue(&state.db, id, &fields).await,
        Err(e) => Err(e),
    };

    let message = match outcome {
        Ok(()) => Flash::info(format!("Venue {} successfully edited!", name)),
        Err(e) if e.is_not_found() => return Err(e.into()),
        Err(e) => Flash::error(failure_message(
            format!("ERROR: Venue {} could not be edited!", name),
            &e,
        )),
    };

    Ok((
        flash::set(jar, message),
        Redirect::to(&format!("/venues/{}", id)),
    ))
}

/// DELETE /venues/:id (and POST /venues/:id/delete from HTML forms)
pub async fn delete_venue(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Command {
    let message = match venues::delete_venue(&state.db, id).await {
        Ok(venue) => Flash::info(format!("Venue {} was deleted.", venue.name)),
        Err(e) if e.is_not_found() => return Err(e.into()),
        Err(e) => Flash::error(failure_message(
            "ERROR: Venue could not be deleted!".to_string(),
            &e,
        )),
    };

    Ok((flash::set(jar, message), Redirect::to("/")))
}

pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/delete", post(delete_venue))
        .route(
            "/venues/:id/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}
