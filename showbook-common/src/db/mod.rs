//! Database models, queries and commands

pub mod artists;
pub mod init;
pub mod migrations;
pub mod models;
pub mod shows;
pub mod venues;

pub use init::{init_database, init_memory_database};
pub use models::*;

use crate::Result;
use sqlx::{Sqlite, Transaction};
use tracing::error;

/// Finish a command transaction: commit on success, roll back on failure
///
/// A failed rollback is logged and the original error is returned.
pub(crate) async fn commit_or_rollback<T>(
    tx: Transaction<'_, Sqlite>,
    outcome: Result<T>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                error!("Rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}
