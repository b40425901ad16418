//! Venue queries and commands

use chrono::NaiveDateTime;
use sqlx::types::Json;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use super::{commit_or_rollback, Venue, VenueFields};
use crate::views::{
    group_by_area, name_matches, partition_shows, Choice, SearchHit, SearchResults, VenueArea,
    VenueDetail, VenueListItem, VenueShow,
};
use crate::{Error, Result};

#[derive(Debug, FromRow)]
struct VenueSummaryRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    num_upcoming_shows: i64,
}

#[derive(Debug, FromRow)]
struct VenueShowRow {
    show_id: i64,
    start_time: NaiveDateTime,
    artist_id: Option<i64>,
    artist_name: Option<String>,
    artist_image_link: Option<String>,
}

/// Fetch one venue by id
pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>(
        r#"
        SELECT id, name, genres, address, city, state, phone, website,
               facebook_link, seeking_talent, seeking_description, image_link
        FROM venues
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::not_found("Venue", id))
}

pub async fn count_venues(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(pool)
        .await?)
}

/// All venues grouped by (city, state) in first-seen order
///
/// `num_upcoming_shows` counts shows starting at or after `now`.
pub async fn list_venue_areas(pool: &SqlitePool, now: NaiveDateTime) -> Result<Vec<VenueArea>> {
    let rows = sqlx::query_as::<_, VenueSummaryRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state,
               (SELECT COUNT(*) FROM shows s
                WHERE s.venue_id = v.id AND s.start_time >= ?) AS num_upcoming_shows
        FROM venues v
        ORDER BY v.id
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(group_by_area(rows.into_iter().map(|row| {
        (
            row.city,
            row.state,
            VenueListItem {
                id: row.id,
                name: row.name,
                num_upcoming_shows: row.num_upcoming_shows,
            },
        )
    })))
}

/// Case-insensitive substring search on venue name
///
/// Matching happens in Rust: SQLite's `lower()` only folds ASCII. The term
/// is matched literally and an empty term matches every venue.
pub async fn search_venues(
    pool: &SqlitePool,
    term: &str,
    now: NaiveDateTime,
) -> Result<SearchResults> {
    let term = term.trim();
    let hits = sqlx::query_as::<_, (i64, String, i64)>(
        r#"
        SELECT v.id, v.name,
               (SELECT COUNT(*) FROM shows s
                WHERE s.venue_id = v.id AND s.start_time >= ?) AS num_upcoming_shows
        FROM venues v
        ORDER BY v.id
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

/// Venue page: the venue plus its shows split around `now`
pub async fn venue_detail(pool: &SqlitePool, id: i64, now: NaiveDateTime) -> Result<VenueDetail> {
    let venue = get_venue(pool, id).await?;

    let rows = sqlx::query_as::<_, VenueShowRow>(
        r#"
        SELECT s.id AS show_id, s.start_time,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
        FROM shows s
        LEFT JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let resolved = rows.into_iter().filter_map(|row| match (row.artist_id, row.artist_name) {
        (Some(artist_id), Some(artist_name)) => Some((
            row.start_time,
            (artist_id, artist_name, row.artist_image_link),
        )),
        _ => {
            warn!("Skipping show {} of venue {}: artist missing", row.show_id, id);
            None
        }
    });

    let shows = partition_shows(
        resolved,
        now,
        |(artist_id, artist_name, artist_image_link), start_time| VenueShow {
            artist_id,
            artist_name,
            artist_image_link,
            start_time,
        },
    );

    Ok(VenueDetail::new(venue, shows))
}

/// Id/name pairs for the create-show form
pub async fn venue_choices(pool: &SqlitePool) -> Result<Vec<Choice>> {
    Ok(
        sqlx::query_as::<_, Choice>("SELECT id, name FROM venues ORDER BY name, id")
            .fetch_all(pool)
            .await?,
    )
}

/// Insert a venue in its own transaction, returning the new id
pub async fn create_venue(pool: &SqlitePool, fields: &VenueFields) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let outcome = insert_venue(&mut tx, fields).await;
    let id = commit_or_rollback(tx, outcome).await?;

    info!("Created venue {} ({})", id, fields.name);
    Ok(id)
}

/// Overwrite every field of an existing venue
pub async fn update_venue(pool: &SqlitePool, id: i64, fields: &VenueFields) -> Result<()> {
    let mut tx = pool.begin().await?;
    let outcome = overwrite_venue(&mut tx, id, fields).await;
    commit_or_rollback(tx, outcome).await?;

    info!("Updated venue {} ({})", id, fields.name);
    Ok(())
}

/// Delete a venue and, by cascade, its shows
///
/// Returns the deleted venue; an unknown id is `NotFound`.
pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<Venue> {
    let mut tx = pool.begin().await?;
    let outcome = remove_venue(&mut tx, id).await;
    let venue = commit_or_rollback(tx, outcome).await?;

    info!("Deleted venue {} ({})", id, venue.name);
    Ok(venue)
}

async fn insert_venue(tx: &mut Transaction<'_, Sqlite>, fields: &VenueFields) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, genres, address, city, state, phone, website,
            facebook_link, seeking_talent, seeking_description, image_link
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(Json(&fields.genres))
    .bind(&fields.address)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.website)
    .bind(&fields.facebook_link)
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .bind(&fields.image_link)
    .execute(&mut **tx)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn overwrite_venue(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    fields: &VenueFields,
) -> Result<()> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    if existing.is_none() {
        return Err(Error::not_found("Venue", id));
    }

    sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, genres = ?, address = ?, city = ?, state = ?, phone = ?,
            website = ?, facebook_link = ?, seeking_talent = ?,
            seeking_description = ?, image_link = ?
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(Json(&fields.genres))
    .bind(&fields.address)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.phone)
    .bind(&fields.website)
    .bind(&fields.facebook_link)
    .bind(fields.seeking_talent)
    .bind(&fields.seeking_description)
    .bind(&fields.image_link)
    .bind(id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn remove_venue(tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<Venue> {
    let venue = sqlx::query_as::<_, Venue>(
        r#"
        SELECT id, name, genres, address, city, state, phone, website,
               facebook_link, seeking_talent, seeking_description, image_link
        FROM venues
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| Error::not_found("Venue", id))?;

    let shows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows WHERE venue_id = ?")
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;
    if shows > 0 {
        info!("Deleting venue {} removes {} show(s)", id, shows);
    }

    sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut **tx)
        .await?;

    Ok(venue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    fn fields(name: &str, city: &str, state: &str) -> VenueFields {
        VenueFields {
            name: name.to_string(),
            address: "1 Main St".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_get_venue() {
        let pool = init_memory_database().await.unwrap();

        let mut input = fields("The Musical Hop", "San Francisco", "CA");
        input.genres = vec!["Jazz".into(), "Reggae".into()];
        input.seeking_talent = true;
        input.website = Some("https://www.themusicalhop.com".into());

        let id = create_venue(&pool, &input).await.unwrap();
        let venue = get_venue(&pool, id).await.unwrap();

        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.genres, vec!["Jazz", "Reggae"]);
        assert!(venue.seeking_talent);
        assert_eq!(venue.website.as_deref(), Some("https://www.themusicalhop.com"));
        assert_eq!(venue.phone, None);
    }

    #[tokio::test]
    async fn test_get_missing_venue_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let err = get_venue(&pool, 99).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_overwrites_every_field() {
        let pool = init_memory_database().await.unwrap();

        let mut original = fields("Old", "Austin", "TX");
        original.seeking_talent = true;
        original.image_link = Some("https://img/old.png".into());
        original.genres = vec!["Folk".into()];
        let id = create_venue(&pool, &original).await.unwrap();

        let mut changed = fields("New", "Dallas", "TX");
        changed.image_link = Some("https://img/new.png".into());
        update_venue(&pool, id, &changed).await.unwrap();

        let venue = get_venue(&pool, id).await.unwrap();
        assert_eq!(venue.name, "New");
        assert_eq!(venue.city, "Dallas");
        assert!(!venue.seeking_talent);
        assert!(venue.genres.is_empty());
        assert_eq!(venue.image_link.as_deref(), Some("https://img/new.png"));
    }

    #[tokio::test]
    async fn test_update_missing_venue_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let err = update_venue(&pool, 5, &fields("X", "Y", "Z")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(count_venues(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_venue_is_not_found() {
        let pool = init_memory_database().await.unwrap();
        let err = delete_venue(&pool, 1).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let pool = init_memory_database().await.unwrap();
        create_venue(&pool, &fields("100% Club", "London", "UK")).await.unwrap();
        create_venue(&pool, &fields("Park Theatre", "London", "UK")).await.unwrap();

        let results = search_venues(&pool, "%", crate::time::now()).await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "100% Club");

        let all = search_venues(&pool, "", crate::time::now()).await.unwrap();
        assert_eq!(all.count, 2);
    }
}
