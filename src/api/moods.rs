use serde::Deserialize;
use uuid::Uuid;

use crate::moods::MoodEntry;
use crate::moods::normalize_mood;
use crate::storage::Storage;
use crate::storage::UpdateEntryValues;
use crate::suggestions::SuggestionProvider;
use crate::suggestions::prompt_for;

use super::Error;
use super::Event;
use super::MOOD_ID;
use super::Message;
use super::Success;

#[derive(Debug, Deserialize)]
pub struct CreateMoodForm {
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

pub async fn create<S: Storage, P: SuggestionProvider>(
    storage: &S,
    provider: &P,
    event: &Event,
) -> Result<Success<MoodEntry>, Error> {
    let form = event.body::<CreateMoodForm>()?;

    let mood = form
        .mood
        .as_deref()
        .and_then(normalize_mood)
        .ok_or_else(|| Error::bad_request("Mood is required"))?;

    let suggestion = provider
        .suggest(&prompt_for(&mood))
        .await
        .map_err(Error::internal_server_error)?;

    let entry = MoodEntry::new(mood, form.note.unwrap_or_default(), suggestion);

    storage
        .put_entry(&entry)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::debug!("Created mood entry {}", entry.entry_id);

    Ok(Success::created(entry))
}

pub async fn single<S: Storage>(storage: &S, event: &Event) -> Result<Success<MoodEntry>, Error> {
    let mood_id = required_mood_id(event.path_parameter(MOOD_ID))?;

    // never stored, so never found
    let Some(entry_id) = parse_entry_id(mood_id) else {
        return Err(Error::not_found("Mood entry not found"));
    };

    storage
        .find_single_entry_by_id(&entry_id)
        .await
        .map_err(Error::internal_server_error)?
        .map_or_else(
            || Err(Error::not_found("Mood entry not found")),
            |entry| Ok(Success::ok(entry)),
        )
}

#[derive(Debug, Deserialize)]
pub struct UpdateMoodForm {
    #[serde(default)]
    mood_id: Option<String>,
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

/// `mood` is normalized like on create, a whitespace-only `mood` counts as absent
pub async fn update<S: Storage>(storage: &S, event: &Event) -> Result<Success<Message>, Error> {
    let form = event.body::<UpdateMoodForm>()?;

    let mood_id = required_mood_id(form.mood_id.as_deref())?;

    let mood = form.mood.as_deref().and_then(normalize_mood);
    let note = form.note.as_deref().filter(|note| !note.is_empty());

    let values = UpdateEntryValues {
        mood: mood.as_deref(),
        note,
    };

    if values.is_empty() {
        return Err(Error::bad_request("No fields to update"));
    }

    if let Some(entry_id) = parse_entry_id(mood_id) {
        storage
            .update_entry(&entry_id, &values)
            .await
            .map_err(Error::internal_server_error)?;

        tracing::debug!("Updated mood entry {entry_id}");
    }

    Ok(Success::ok(Message::new("Mood updated successfully")))
}

pub async fn delete<S: Storage>(storage: &S, event: &Event) -> Result<Success<Message>, Error> {
    let mood_id = required_mood_id(event.path_parameter(MOOD_ID))?;

    if let Some(entry_id) = parse_entry_id(mood_id) {
        storage
            .delete_entry(&entry_id)
            .await
            .map_err(Error::internal_server_error)?;

        tracing::debug!("Deleted mood entry {entry_id}");
    }

    Ok(Success::ok(Message::new("Mood entry deleted successfully")))
}

fn required_mood_id(mood_id: Option<&str>) -> Result<&str, Error> {
    mood_id
        .filter(|mood_id| !mood_id.is_empty())
        .ok_or_else(|| Error::bad_request("mood_id is required"))
}

/// Only UUIDs are ever handed out as IDs
fn parse_entry_id(mood_id: &str) -> Option<Uuid> {
    Uuid::parse_str(mood_id).ok()
}
