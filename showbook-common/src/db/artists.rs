//! Artist queries and commands
//!
//! Artists have no delete path.

use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use super::{commit_or_rollback, Artist, ArtistFields};
use crate::views::{
    name_matches, partition_shows, ArtistDetail, ArtistListItem, ArtistShow, Choice, SearchHit,
    SearchResults,
};
use crate::{Error, Result};

#[derive(Debug, FromRow)]
struct ArtistShowRow {
    show_id: i64,
    start_time: NaiveDateTime,
    venue_id: Option<i64>,
    venue_name: Option<String>,
    venue_image_link: Option<String>,
}

pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>(
        r#"
        SELECT id, name, city, state, phone, website, genres,
               facebook_link, seeking_venue, seeking_description, image_link
        FROM artists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::not_found("Artist", id))
}

pub async fn count_artists(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?)
}

/// Flat id/name listing in creation order
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<ArtistListItem>> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| ArtistListItem { id, name })
        .collect())
}

/// Case-insensitive substring search on artist name
///
/// Filtered in Rust so non-ASCII names fold case too.
pub async fn search_artists(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let term = term.trim();
    let hits = sqlx::query_as::<_, (i64, String, i64)>(
        r#"
        SELECT a.id, a.name,
               (SELECT COUNT(*) FROM shows s
                WHERE s.artist_id = a.id AND s.start_time >= ?) AS num_upcoming_shows
        FROM artists a
        ORDER BY a.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?
    .into_iter()
    .filter(|(_, name, _)| name_matches(name, term))
    .map(|(id, name, num_upcoming_shows)| SearchHit {
        id,
        name,
        num_upcoming_shows,
    })
    .collect();

    Ok(SearchResults::new(hits))
}

/// Artist page: the artist plus its shows split around `now`
pub async fn artist_detail(
    pool: &SqlitePool,
    id: i64,
    now: NaiveDateTime,
) -> Result<ArtistDetail> {
    let artist = get_artist(pool, id).await?;

    let rows = sqlx::query_as::<_, ArtistShowRow>(
        r#"
        SELECT s.id AS show_id, s.start_time,
               v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link
        FROM shows s
        LEFT JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let resolved = rows.into_iter().filter_map(|row| match (row.venue_id, row.venue_name) {
        (Some(venue_id), Some(venue_name)) => Some((
            row.start_time,
            (venue_id, venue_name, row.venue_image_link),
        )),
        _ => {
            warn!("Skipping show {} of artist {}: venue missing", row.show_id, id);
            None
        }
    });

    let shows = partition_shows(
        resolved,
        now,
        |(venue_id, venue_name, venue_image_link), start_time| ArtistShow {
            venue_id,
            venue_name,
            venue_image_link,
            start_time,
        },
    );

    Ok(ArtistDetail::new(artist, shows))
}

pub async fn artist_choices(pool: &SqlitePool) -> Result<Vec<Choice>> {
    Ok(
        sqlx::query_as::<_, Choice>("SELECT id, name FROM artists ORDER BY name, id")
            .fetch_all(pool)
            .await?,
    )
}

/// Insert an artist in its own transaction, returning the new id
pub async fn create_artist(pool: &SqlitePool, fields: &ArtistFields) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let outcome = insert_artist(&mut tx, fields).await;
    let id = commit_or_rollback(tx, outcome).await?;

    info!("Created artist {} ({})", id, fields.name);
    Ok(id)
}

/// Overwrite every field of an existing artist
pub async fn update_artist(pool: &SqlitePool, id: i64, fields: &ArtistFields) -> Result<()> {
    let mut tx = pool.begin().await?;
    let outcome = overwrite_artist(&mut tx, id, fields).await;
    commit_or_rollback(tx, outcome).await?;

    info!("Updated artist {} ({})", id, fields.name);
    Ok(())
}

async fn insert_artist(tx: &mut Transaction<'_, Sqlite>, fields: &ArtistFields) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, website, genres,
            facebook_link, seeking_venue, seeking_description, image_link
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.website)
    .bind(Json(&fields.genres))
    .bind(&fields.facebook_link)
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .bind(&fields.image_link)
    .execute(&mut **tx)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn overwrite_artist(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    fields: &ArtistFields,
) -> Result<()> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    if existing.is_none() {
        return Err(Error::not_found("Artist", id));
    }

    sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, website = ?, genres = ?,
            facebook_link = ?, seeking_venue = ?, seeking_description = ?, image_link = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.website)
    .bind(Json(&fields.genres))
    .bind(&fields.facebook_link)
    .bind(fields.seeking_venue)
    .bind(&fields.seeking_description)
    .bind(&fields.image_link)
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
