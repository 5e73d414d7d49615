use chrono::NaiveDateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A single mood journal entry
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MoodEntry {
    /// Primary key, `mood_id` on the wire
    #[serde(rename = "mood_id")]
    pub entry_id: Uuid,
    pub mood: String,
    pub note: String,
    pub suggestion: String,
    pub timestamp: NaiveDateTime,
}

impl MoodEntry {
    /// Create a fresh entry with a new ID and the current UTC time
    pub fn new(mood: String, note: String, suggestion: String) -> Self {
        Self {
            entry_id: Uuid::new_v4(),
            mood,
            note,
            suggestion,
            timestamp: Utc::now().naive_utc(),
        }
    }
}

/// Normalize a mood label: trimmed and lowercased
///
/// Returns `None` when nothing is left
pub fn normalize_mood(mood: &str) -> Option<String> {
    let mood = mood.trim().to_lowercase();

    if mood.is_empty() { None } else { Some(mood) }
}
