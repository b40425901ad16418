//! Artist pages and commands

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use showbook_common::db::artists;
use showbook_common::forms::{parse_artist, FormData};
use showbook_common::time;

use super::{failure_message, EntityId};
use crate::error::WebResult;
use crate::flash::{self, Flash};
use crate::ui;
use crate::AppState;

type Page = WebResult<(CookieJar, Html<String>)>;
type Command = WebResult<(CookieJar, Redirect)>;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>, jar: CookieJar) -> Page {
    let (jar, flash) = flash::take(jar);
    let listing = artists::list_artists(&state.db).await?;
    Ok((jar, Html(ui::artists::artists_page(&listing, flash.as_ref()))))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Page {
    let (jar, flash) = flash::take(jar);
    let form = FormData::from(pairs);
    let term = form.get("search_term").unwrap_or_default().trim().to_string();

    let results = artists::search_artists(&state.db, &term, time::now()).await?;
    Ok((
        jar,
        Html(ui::artists::artist_search_page(&term, &results, flash.as_ref())),
    ))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Page {
    let (jar, flash) = flash::take(jar);
    let detail = artists::artist_detail(&state.db, id, time::now()).await?;
    Ok((jar, Html(ui::artists::artist_page(&detail, flash.as_ref()))))
}

/// GET /artists/create
pub async fn create_artist_form(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = flash::take(jar);
    (jar, Html(ui::forms::artist_form(None, flash.as_ref())))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Command {
    let form = FormData::from(pairs);
    let name = form.get("name").unwrap_or_default().trim().to_string();

    let outcome = match parse_artist(&form) {
        Ok(fields) => artists::create_artist(&state.db, &fields).await.map(|_| ()),
        Err(e) => Err(e),
    };

    let message = match outcome {
        Ok(()) => Flash::info(format!("Artist {} was successfully listed!", name)),
        Err(e) => Flash::error(failure_message(
            format!("ERROR: Artist {} could not be listed!", name),
            &e,
        )),
    };

    Ok((flash::set(jar, message), Redirect::to("/")))
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
) -> Page {
    let (jar, flash) = flash::take(jar);
    let artist = artists::get_artist(&state.db, id).await?;
    Ok((jar, Html(ui::forms::artist_form(Some(&artist), flash.as_ref()))))
}

/// POST /artists/:id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Command {
    // Missing id wins over a bad form
    artists::get_artist(&state.db, id).await?;

    let form = FormData::from(pairs);
    let name = form.get("name").unwrap_or_default().trim().to_string();

    let outcome = match parse_artist(&form) {
        Ok(fields) => artists::update_artist(&state.db, id, &fields).await,
        Err(e) => Err(e),
    };

    let message = match outcome {
        Ok(()) => Flash::info(format!("Artist {} was successfully updated!", name)),
        Err(e) if e.is_not_found() => return Err(e.into()),
        Err(e) => Flash::error(failure_message(
            format!("ERROR: Artist {} could not be edited!", name),
            &e,
        )),
    };

    Ok((
        flash::set(jar, message),
        Redirect::to(&format!("/artists/{}", id)),
    ))
}

pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/:id", get(show_artist))
        .route(
            "/artists/:id/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}
