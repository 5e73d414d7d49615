//! All things related to the storage of mood entries

use core::fmt;
use std::future::Future;

use uuid::Uuid;

use crate::moods::MoodEntry;

pub use memory::Memory;
#[cfg(feature = "postgres")]
pub use postgres::Postgres;

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

/// Setup the storage
#[cfg(not(feature = "postgres"))]
#[allow(clippy::unused_async)]
pub async fn setup() -> anyhow::Result<Memory> {
    tracing::info!("Using in-memory storage, entries are lost on shutdown");

    Ok(Memory::new())
}

/// Setup the storage
///
/// Uses the `DATABASE_URL` environment variable
#[cfg(feature = "postgres")]
pub async fn setup() -> anyhow::Result<Postgres> {
    let database_url = crate::utils::env_var("DATABASE_URL")
        .ok_or_else(|| anyhow::anyhow!("`DATABASE_URL` is required with the postgres feature"))?;

    Postgres::connect(&database_url).await
}

/// Storage errors
#[derive(Debug)]
#[allow(dead_code)]
pub enum Error {
    /// A connection error with the storage
    Connection(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(error) => write!(f, "Connection error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Values to partially update an entry
///
/// Only the fields that are `Some` are written
#[derive(Debug, Default)]
pub struct UpdateEntryValues<'a> {
    /// New normalized mood
    pub mood: Option<&'a str>,

    /// New note
    pub note: Option<&'a str>,
}

impl UpdateEntryValues<'_> {
    /// Nothing to write
    pub fn is_empty(&self) -> bool {
        self.mood.is_none() && self.note.is_none()
    }
}

/// Key-value storage for mood entries, keyed by the entry ID
pub trait Storage: Clone + Send + Sync + 'static {
    /// Find a single entry by its ID
    fn find_single_entry_by_id(
        &self,
        id: &Uuid,
    ) -> impl Future<Output = Result<Option<MoodEntry>>> + Send;

    /// Store an entry, replacing any entry with the same ID
    fn put_entry(&self, entry: &MoodEntry) -> impl Future<Output = Result<()>> + Send;

    /// Overwrite only the given fields of an entry
    ///
    /// Does not check for existence, an unknown ID is not an error and creates nothing
    fn update_entry(
        &self,
        id: &Uuid,
        values: &UpdateEntryValues<'_>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Delete an entry
    ///
    /// Deleting an unknown ID is not an error
    fn delete_entry(&self, id: &Uuid) -> impl Future<Output = Result<()>> + Send;
}
