//! Postgres storage

use std::time::Duration;

use chrono::NaiveDateTime;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::moods::MoodEntry;

use super::Error;
use super::Result;
use super::Storage;
use super::UpdateEntryValues;

/// Migrator to run migrations on startup
static MIGRATOR: Migrator = sqlx::migrate!();

/// `SQLx` row of the `moods` table
#[derive(sqlx::FromRow)]
struct SqlxMoodEntry {
    mood_id: Uuid,
    mood: String,
    note: String,
    suggestion: String,
    timestamp: NaiveDateTime,
}

impl SqlxMoodEntry {
    fn into_entry(self) -> MoodEntry {
        MoodEntry {
            entry_id: self.mood_id,
            mood: self.mood,
            note: self.note,
            suggestion: self.suggestion,
            timestamp: self.timestamp,
        }
    }
}

/// Postgres storage
#[derive(Clone, Debug)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Connect to Postgres and run the migrations
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    pub async fn new_with_pool(connection_pool: PgPool) -> anyhow::Result<Self> {
        MIGRATOR.run(&connection_pool).await?;

        Ok(Self { connection_pool })
    }
}

impl Storage for Postgres {
    async fn find_single_entry_by_id(&self, id: &Uuid) -> Result<Option<MoodEntry>> {
        let entry = sqlx::query_as::<_, SqlxMoodEntry>(
            r"
            SELECT
                mood_id,
                mood,
                note,
                suggestion,
                timestamp
            FROM moods
            WHERE mood_id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(entry.map(SqlxMoodEntry::into_entry))
    }

    async fn put_entry(&self, entry: &MoodEntry) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO moods (mood_id, mood, note, suggestion, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (mood_id) DO UPDATE
            SET mood = EXCLUDED.mood,
                note = EXCLUDED.note,
                suggestion = EXCLUDED.suggestion,
                timestamp = EXCLUDED.timestamp
            ",
        )
        .bind(entry.entry_id)
        .bind(&entry.mood)
        .bind(&entry.note)
        .bind(&entry.suggestion)
        .bind(entry.timestamp)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(())
    }

    async fn update_entry(&self, id: &Uuid, values: &UpdateEntryValues<'_>) -> Result<()> {
        sqlx::query(
            r"
            UPDATE moods
            SET mood = COALESCE($2, mood),
                note = COALESCE($3, note)
            WHERE mood_id = $1
            ",
        )
        .bind(id)
        .bind(values.mood)
        .bind(values.note)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(())
    }

    async fn delete_entry(&self, id: &Uuid) -> Result<()> {
        sqlx::query(
            r"
            DELETE FROM moods
            WHERE mood_id = $1
            ",
        )
        .bind(id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(())
    }
}

/// Convert any error into a connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}
