//! Integration tests for showbook-web routes
//!
//! Every test builds the router over a fresh in-memory database and drives
//! it with `oneshot`.

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use axum_extra::extract::cookie::Cookie;
use chrono::{Duration, Utc};
use serde_json::Value;
use showbook_common::db::artists::create_artist;
use showbook_common::db::shows::{count_shows, create_show};
use showbook_common::db::venues::{count_venues, create_venue, get_venue};
use showbook_common::db::{init_memory_database, ArtistFields, ShowFields, VenueFields};
use showbook_web::flash::{Flash, FlashLevel, FLASH_COOKIE};
use showbook_web::{build_router, AppState};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot`

async fn setup() -> (SqlitePool, Router) {
    let pool = init_memory_database().await.expect("Should create database");
    let app = build_router(AppState::new(pool.clone()));
    (pool, app)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

/// `flash=...` pair from a response's Set-Cookie headers, as sent
fn flash_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", FLASH_COOKIE)))
        .map(str::to_string)
}

fn flash_of(response: &Response<Body>) -> Flash {
    let pair = flash_pair(response).expect("Response should set a flash cookie");
    let cookie = Cookie::parse_encoded(pair).expect("Flash cookie should parse");
    Flash::from_cookie_value(cookie.value()).expect("Flash cookie should decode")
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Redirect should carry a Location")
}

fn venue(name: &str) -> VenueFields {
    VenueFields {
        name: name.to_string(),
        address: "1015 Folsom Street".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        ..Default::default()
    }
}

fn artist(name: &str) -> ArtistFields {
    ArtistFields {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        ..Default::default()
    }
}

// =============================================================================
// Health and fallback
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_, app) = setup().await;

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "showbook-web");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_path_renders_404_page() {
    let (_, app) = setup().await;

    let response = app.oneshot(get("/no/such/page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));
}

#[tokio::test]
async fn test_non_numeric_id_renders_404_page() {
    let (_, app) = setup().await;

    for uri in ["/venues/abc", "/venues/abc/edit", "/artists/abc", "/artists/1.5/edit"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);
        assert!(body_text(response).await.contains("404"), "GET {}", uri);
    }

    let response = app
        .clone()
        .oneshot(post_form("/venues/abc/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));

    let response = app
        .oneshot(post_form("/artists/abc/edit", "name=X&city=Y&state=CA"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(flash_pair(&response).is_none());
}

#[tokio::test]
async fn test_home_page_shows_totals() {
    let (pool, app) = setup().await;
    create_venue(&pool, &venue("The Musical Hop")).await.unwrap();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("1 venues, 0 artists, 0 shows"));
}

// =============================================================================
// Venues
// =============================================================================

#[tokio::test]
async fn test_create_venue_end_to_end() {
    let (pool, app) = setup().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/venues/create",
            "name=The+Fillmore&city=San+Francisco&state=CA&address=1805+Geary+Blvd&genres=Jazz&genres=Rock",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        flash_of(&response),
        Flash::info("Venue The Fillmore successfully listed!")
    );

    let stored = get_venue(&pool, 1).await.unwrap();
    assert_eq!(stored.name, "The Fillmore");
    assert_eq!(stored.genres, vec!["Jazz", "Rock"]);
    assert!(!stored.seeking_talent);
    assert_eq!(stored.phone, None);

    // The next page render shows the flash
    let request = Request::builder()
        .uri("/")
        .header(header::COOKIE, flash_pair(&response).unwrap())
        .body(Body::empty())
        .unwrap();
    let page = app.oneshot(request).await.unwrap();
    assert!(body_text(page)
        .await
        .contains("Venue The Fillmore successfully listed!"));
}

#[tokio::test]
async fn test_create_venue_without_name_flashes_error() {
    let (pool, app) = setup().await;

    let response = app
        .oneshot(post_form(
            "/venues/create",
            "city=San+Francisco&state=CA&address=1805+Geary+Blvd",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let flash = flash_of(&response);
    assert_eq!(flash.level, FlashLevel::Error);
    assert!(flash.message.starts_with("ERROR: Venue"));
    assert!(flash.message.contains("could not be listed!"));
    assert!(flash.message.contains("'name'"));
    assert_eq!(count_venues(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_venue_detail_and_missing_venue() {
    let (pool, app) = setup().await;
    let id = create_venue(&pool, &venue("The Musical Hop")).await.unwrap();

    let response = app.clone().oneshot(get(&format!("/venues/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("0 Upcoming Shows"));

    let response = app.oneshot(get("/venues/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_venue_listing_and_search() {
    let (pool, app) = setup().await;
    create_venue(&pool, &venue("The Musical Hop")).await.unwrap();
    create_venue(&pool, &venue("Park Square Live Music & Coffee")).await.unwrap();
    create_venue(&pool, &venue("The Dueling Pianos Bar")).await.unwrap();

    let response = app.clone().oneshot(get("/venues")).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("San Francisco, CA"));
    assert!(html.contains("The Dueling Pianos Bar"));

    let response = app
        .oneshot(post_form("/venues/search", "search_term=music"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(": 2</h3>"));
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("Park Square Live Music &amp; Coffee"));
    assert!(!html.contains("The Dueling Pianos Bar"));
}

#[tokio::test]
async fn test_edit_venue_clears_unchecked_checkbox() {
    let (pool, app) = setup().await;
    let mut fields = venue("The Musical Hop");
    fields.seeking_talent = true;
    let id = create_venue(&pool, &fields).await.unwrap();

    let response = app
        .oneshot(post_form(
            &format!("/venues/{}/edit", id),
            "name=The+Musical+Hop&city=San+Francisco&state=CA&address=1015+Folsom+Street&image_link=https%3A%2F%2Fimg%2Fhop.png",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/venues/{}", id));
    assert_eq!(
        flash_of(&response),
        Flash::info("Venue The Musical Hop successfully edited!")
    );

    let stored = get_venue(&pool, id).await.unwrap();
    assert!(!stored.seeking_talent);
    assert_eq!(stored.image_link.as_deref(), Some("https://img/hop.png"));
}

#[tokio::test]
async fn test_edit_missing_venue_is_404() {
    let (_, app) = setup().await;

    let response = app.clone().oneshot(get("/venues/42/edit")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post_form(
            "/venues/42/edit",
            "name=X&city=Y&state=Z&address=W",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_edit_of_missing_entity_is_404() {
    let (_, app) = setup().await;

    for uri in ["/venues/42/edit", "/artists/42/edit"] {
        let response = app
            .clone()
            .oneshot(post_form(uri, "name=&city=Y"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "POST {}", uri);
        assert!(flash_pair(&response).is_none(), "POST {}", uri);
        assert!(body_text(response).await.contains("404"));
    }
}

#[tokio::test]
async fn test_delete_venue_removes_it_and_its_shows() {
    let (pool, app) = setup().await;
    let venue_id = create_venue(&pool, &venue("The Musical Hop")).await.unwrap();
    let artist_id = create_artist(&pool, &artist("Guns N Petals")).await.unwrap();
    create_show(
        &pool,
        &ShowFields {
            venue_id,
            artist_id,
            start_time: (Utc::now() + Duration::days(30)).naive_utc(),
        },
    )
    .await
    .unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/venues/{}", venue_id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        flash_of(&response),
        Flash::info("Venue The Musical Hop was deleted.")
    );
    assert_eq!(count_venues(&pool).await.unwrap(), 0);
    assert_eq!(count_shows(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_venue_is_404() {
    let (_, app) = setup().await;

    let response = app
        .oneshot(post_form("/venues/77/delete", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Artists
// =============================================================================

#[tokio::test]
async fn test_create_and_update_artist() {
    let (pool, app) = setup().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/artists/create",
            "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Rock+n+Roll&seeking_venue=y",
        ))
        .await
        .unwrap();
    assert_eq!(
        flash_of(&response),
        Flash::info("Artist Guns N Petals was successfully listed!")
    );

    let response = app
        .clone()
        .oneshot(post_form(
            "/artists/1/edit",
            "name=Guns+N+Petals&city=Oakland&state=CA",
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/artists/1");
    assert_eq!(
        flash_of(&response),
        Flash::info("Artist Guns N Petals was successfully updated!")
    );

    let response = app.oneshot(get("/artists/1")).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Oakland, CA"));
    assert!(html.contains("Not currently seeking performance venues"));
    assert_eq!(
        showbook_common::db::artists::count_artists(&pool).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn test_edit_artist_with_blank_city_flashes_error() {
    let (pool, app) = setup().await;
    create_artist(&pool, &artist("Matt Quevedo")).await.unwrap();

    let response = app
        .oneshot(post_form("/artists/1/edit", "name=Matt+Quevedo&city=++&state=NY"))
        .await
        .unwrap();

    assert_eq!(location(&response), "/artists/1");
    let flash = flash_of(&response);
    assert_eq!(flash.level, FlashLevel::Error);
    assert!(flash
        .message
        .starts_with("ERROR: Artist Matt Quevedo could not be edited!"));
}

#[tokio::test]
async fn test_artist_search_and_missing_artist() {
    let (pool, app) = setup().await;
    create_artist(&pool, &artist("Guns N Petals")).await.unwrap();
    create_artist(&pool, &artist("Matt Quevedo")).await.unwrap();
    create_artist(&pool, &artist("The Wild Sax Band")).await.unwrap();

    let response = app
        .clone()
        .oneshot(post_form("/artists/search", "search_term=A"))
        .await
        .unwrap();
    assert!(body_text(response).await.contains(": 3</h3>"));

    let response = app.oneshot(get("/artists/404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_create_show_and_list() {
    let (pool, app) = setup().await;
    create_venue(&pool, &venue("The Musical Hop")).await.unwrap();
    create_artist(&pool, &artist("Guns N Petals")).await.unwrap();

    let response = app.clone().oneshot(get("/shows/create")).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains(r#"<option value="1">The Musical Hop</option>"#));
    assert!(html.contains(r#"<option value="1">Guns N Petals</option>"#));

    let response = app
        .clone()
        .oneshot(post_form(
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=2035-04-01T20%3A00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(flash_of(&response), Flash::info("Show successfully listed!"));

    let response = app.oneshot(get("/shows")).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("April 01 2035 - 20:00:00"));
    assert!(html.contains("Guns N Petals"));
}

#[tokio::test]
async fn test_create_show_for_missing_artist_fails() {
    let (pool, app) = setup().await;
    create_venue(&pool, &venue("The Musical Hop")).await.unwrap();

    let response = app
        .oneshot(post_form(
            "/shows/create",
            "artist_id=5&venue_id=1&start_time=2035-04-01+20%3A00%3A00",
        ))
        .await
        .unwrap();

    let flash = flash_of(&response);
    assert_eq!(flash.level, FlashLevel::Error);
    assert!(flash.message.starts_with("ERROR: Show could not be listed!"));
    assert_eq!(count_shows(&pool).await.unwrap(), 0);
}
