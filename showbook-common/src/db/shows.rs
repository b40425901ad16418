//! Show queries and commands

use chrono::NaiveDateTime;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use tracing::{info, warn};

use super::{commit_or_rollback, ShowFields};
use crate::time::format_show_time;
use crate::views::ShowListing;
use crate::{Error, Result};

#[derive(Debug, FromRow)]
struct ShowListingRow {
    show_id: i64,
    start_time: NaiveDateTime,
    venue_id: Option<i64>,
    venue_name: Option<String>,
    artist_id: Option<i64>,
    artist_name: Option<String>,
    artist_image_link: Option<String>,
}

impl ShowListingRow {
    fn resolve(self) -> Option<ShowListing> {
        match (self.venue_id, self.venue_name, self.artist_id, self.artist_name) {
            (Some(venue_id), Some(venue_name), Some(artist_id), Some(artist_name)) => {
                Some(ShowListing {
                    venue_id,
                    venue_name,
                    artist_id,
                    artist_name,
                    artist_image_link: self.artist_image_link,
                    start_time: format_show_time(self.start_time),
                })
            }
            _ => {
                warn!("Skipping show {}: venue or artist missing", self.show_id);
                None
            }
        }
    }
}

pub async fn count_shows(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await?)
}

/// Every show with its venue and artist, in start time order
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query_as::<_, ShowListingRow>(
        r#"
        SELECT s.id AS show_id, s.start_time,
               v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
        FROM shows s
        LEFT JOIN venues v ON v.id = s.venue_id
        LEFT JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(ShowListingRow::resolve).collect())
}

/// Insert a show in its own transaction, returning the new id
///
/// Both referents are checked inside the transaction so the caller gets a
/// validation error naming the bad field; the foreign keys back this up.
pub async fn create_show(pool: &SqlitePool, fields: &ShowFields) -> Result<i64> {
    let mut tx = pool.begin().await?;
    let outcome = insert_show(&mut tx, fields).await;
    let id = commit_or_rollback(tx, outcome).await?;

    info!(
        "Created show {} (venue {}, artist {}, {})",
        id, fields.venue_id, fields.artist_id, fields.start_time
    );
    Ok(id)
}

async fn insert_show(tx: &mut Transaction<'_, Sqlite>, fields: &ShowFields) -> Result<i64> {
    ensure_exists(tx, "venues", "venue_id", fields.venue_id).await?;
    ensure_exists(tx, "artists", "artist_id", fields.artist_id).await?;

    let result =
        sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
            .bind(fields.venue_id)
            .bind(fields.artist_id)
            .bind(fields.start_time)
            .execute(&mut **tx)
            .await?;

    Ok(result.last_insert_rowid())
}

async fn ensure_exists(
    tx: &mut Transaction<'_, Sqlite>,
    table: &'static str,
    field: &str,
    id: i64,
) -> Result<()> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", table);
    let exists: bool = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;

    if exists {
        Ok(())
    } else {
        Err(Error::malformed(field, format!("no {} with id {}", &table[..table.len() - 1], id)))
    }
}
