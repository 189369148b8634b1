use crate::config::AppConfig;
use crate::error::ApiError;
use log::debug;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const MAX_TOKENS: u32 = 3000;
const TEMPERATURE: f32 = 0.2;

const SYSTEM_PROMPT: &str = "You are a Senior Developer and Technical Writer. \
You excel at inferring project functionality from file structures and metadata.";

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

pub struct LlmClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let api_key = config
            .groq_api_key
            .clone()
            .ok_or_else(|| ApiError::Internal("GROQ_API_KEY is not configured".to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(LlmClient {
            http,
            api_key,
            model: config.groq_model.clone(),
        })
    }

    /// Runs one chat completion over the prepared prompt and returns the
    /// generated markdown.
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        debug!(
            "Requesting completion from model '{}' ({} prompt chars)",
            self.model,
            prompt.len()
        );
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let response = self
            .http
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::LlmFailure(format!("completion request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(ApiError::LlmFailure(format!(
                "completion request returned {}",
                response.status()
            )));
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| ApiError::LlmFailure(format!("malformed completion response: {}", e)))?;
        extract_content(completion)
            .ok_or_else(|| ApiError::LlmFailure("completion carried no choices".to_string()))
    }
}

fn extract_content(completion: Completion) -> Option<String> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_first_choice_content() {
        let completion: Completion = serde_json::from_value(serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "# Title" } },
                { "message": { "role": "assistant", "content": "ignored" } },
            ]
        }))
        .unwrap();
        assert_eq!(extract_content(completion).as_deref(), Some("# Title"));
    }

    #[test]
    fn empty_choices_yield_nothing() {
        let completion: Completion =
            serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert_eq!(extract_content(completion), None);
    }
}
