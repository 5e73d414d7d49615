use std::sync::Arc;

use super::Result;
use super::SuggestionProvider;

/// Provider that always suggests the same text
#[derive(Clone, Debug)]
pub struct Fixed {
    suggestion: Arc<str>,
}

impl Fixed {
    pub fn new(suggestion: &str) -> Self {
        Self {
            suggestion: Arc::from(suggestion),
        }
    }
}

impl SuggestionProvider for Fixed {
    async fn suggest(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Fixed suggestion for prompt: {prompt}");

        Ok(self.suggestion.to_string())
    }
}
