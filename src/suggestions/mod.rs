//! Suggestions from an external text-completion service
//!
//! Every new mood entry gets one suggestion, asked for with a prompt based on the mood

use core::fmt;
use std::future::Future;
use std::time::Duration;

pub use completion::Completion;
pub use fixed::Fixed;

use crate::utils::env_var;

mod completion;
mod fixed;

/// Used when the service answers without any suggestion text
pub const NO_SUGGESTION: &str = "No suggestion found.";

/// Default timeout for a single suggestion request
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// The prompt sent to the service for a (normalized) mood
pub fn prompt_for(mood: &str) -> String {
    format!("How do I deal with feeling {mood}?")
}

/// Setup the suggestion provider
///
/// Uses the `SUGGESTION_URL`, `SUGGESTION_API_KEY` and `SUGGESTION_TIMEOUT` environment
/// variables, without `SUGGESTION_URL` every suggestion will be the placeholder
///
/// # Errors
///
/// Will return `Err` when the timeout is not a number of seconds or the HTTP client can not be
/// built
pub fn setup() -> anyhow::Result<Provider> {
    let Some(url) = env_var("SUGGESTION_URL") else {
        tracing::info!("`SUGGESTION_URL` is not set, every suggestion will be: {NO_SUGGESTION}");

        return Ok(Provider::Fixed(Fixed::new(NO_SUGGESTION)));
    };

    let timeout = match env_var("SUGGESTION_TIMEOUT") {
        Some(timeout) => timeout.parse::<u64>()?,
        None => DEFAULT_TIMEOUT_SECONDS,
    };

    tracing::info!("Asking suggestions from {url} (timeout: {timeout}s)");

    let completion = Completion::new(
        url,
        env_var("SUGGESTION_API_KEY"),
        Duration::from_secs(timeout),
    )?;

    Ok(Provider::Completion(completion))
}

/// Suggestion errors
#[derive(Debug)]
pub enum Error {
    /// The request could not be sent or timed out
    Request(String),

    /// The service answered with a non-success status
    Status(u16),

    /// The answer was not the expected JSON
    Decode(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Request(error) => write!(f, "Request error: {error}"),
            Error::Status(status) => write!(f, "Unexpected status: {status}"),
            Error::Decode(error) => write!(f, "Decode error: {error}"),
        }
    }
}

/// Result type for all suggestion interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Something that comes up with a suggestion for a prompt
pub trait SuggestionProvider: Clone + Send + Sync + 'static {
    /// Ask for a single suggestion
    ///
    /// Answers [`NO_SUGGESTION`] when the service had nothing to say
    fn suggest(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// The provider picked by [`setup`]
#[derive(Clone, Debug)]
pub enum Provider {
    Completion(Completion),
    Fixed(Fixed),
}

impl SuggestionProvider for Provider {
    async fn suggest(&self, prompt: &str) -> Result<String> {
        match self {
            Provider::Completion(completion) => completion.suggest(prompt).await,
            Provider::Fixed(fixed) => fixed.suggest(prompt).await,
        }
    }
}
