//! Text-completion service over HTTP
//!
//! Sends `{"inputText": ...}` and reads `{"results": [{"outputText": ...}]}`

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;

use super::Error;
use super::NO_SUGGESTION;
use super::Result;
use super::SuggestionProvider;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionRequest<'a> {
    input_text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    results: Vec<CompletionResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionResult {
    output_text: Option<String>,
}

impl CompletionResponse {
    /// The text of the first result, or the placeholder
    fn first_suggestion(self) -> String {
        self.results
            .into_iter()
            .next()
            .and_then(|result| result.output_text)
            .unwrap_or_else(|| NO_SUGGESTION.to_string())
    }
}

/// Client for the text-completion service
///
/// Cheap to clone, all clones share the same connection pool
#[derive(Clone, Debug)]
pub struct Completion {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl Completion {
    /// Create a client for the service at `url`
    ///
    /// Every request is bounded by `timeout`
    pub fn new(url: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(request_error)?;

        Ok(Self {
            client,
            url,
            api_key,
        })
    }
}

impl SuggestionProvider for Completion {
    async fn suggest(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Sending prompt to {}: {prompt}", self.url);

        let mut request = self
            .client
            .post(&self.url)
            .json(&CompletionRequest { input_text: prompt });

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let completion = response
            .json::<CompletionResponse>()
            .await
            .map_err(|err| Error::Decode(err.to_string()))?;

        tracing::debug!("Received completion: {completion:?}");

        Ok(completion.first_suggestion())
    }
}

fn request_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Request(err.to_string())
}
