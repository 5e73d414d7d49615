//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::moods::MoodEntry;

use super::Result;
use super::Storage;
use super::UpdateEntryValues;

/// An in-memory storage
///
/// Will be destroyed on system shutdown
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "postgres", allow(dead_code))]
pub struct Memory {
    /// All entries in storage
    entries: Arc<Mutex<HashMap<Uuid, MoodEntry>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    #[cfg_attr(feature = "postgres", allow(dead_code))]
    pub fn new() -> Self {
        Self::default()
    }

    /// No entries stored at all
    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Storage for Memory {
    async fn find_single_entry_by_id(&self, id: &Uuid) -> Result<Option<MoodEntry>> {
        Ok(self.entries.lock().await.get(id).cloned())
    }

    async fn put_entry(&self, entry: &MoodEntry) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(entry.entry_id, entry.clone());

        Ok(())
    }

    async fn update_entry(&self, id: &Uuid, values: &UpdateEntryValues<'_>) -> Result<()> {
        if let Some(entry) = self.entries.lock().await.get_mut(id) {
            if let Some(mood) = values.mood {
                entry.mood = mood.to_string();
            }

            if let Some(note) = values.note {
                entry.note = note.to_string();
            }
        }

        Ok(())
    }

    async fn delete_entry(&self, id: &Uuid) -> Result<()> {
        self.entries.lock().await.remove(id);

        Ok(())
    }
}
