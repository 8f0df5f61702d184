//! Chat-completion client that turns search summaries into contacts.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ContactsError;
use crate::prompt::EXTRACTION_PROMPT;
use crate::search::join_endpoint;
use crate::types::ExtractedContact;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/";
pub const EXTRACTION_MODEL: &str = "openai/gpt-4o-mini";
const TEMPERATURE: f32 = 0.1;
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'static str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the `OpenRouter` chat-completions API.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl OpenRouterClient {
    /// # Errors
    ///
    /// Returns [`ContactsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ContactsError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ContactsError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ContactsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ContactsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint: join_endpoint(base_url, "api/v1/chat/completions")?,
        })
    }

    /// Sends the search summary to the model and parses its reply.
    ///
    /// A reply that is not a JSON array yields an empty list rather than an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`ContactsError::Http`] on network failure.
    /// - [`ContactsError::Api`] on a non-2xx status.
    /// - [`ContactsError::Deserialize`] if the completion envelope is malformed.
    pub async fn extract_contacts(
        &self,
        summary: &str,
    ) -> Result<Vec<ExtractedContact>, ContactsError> {
        let user_content = format!("Here's the output of the google search results:\n{summary}");
        let request = ChatRequest {
            model: EXTRACTION_MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_content,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ContactsError::Api {
                service: "openrouter",
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ContactsError::Deserialize {
                context: "openrouter chat completion".to_string(),
                source: e,
            })?;
        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(parse_contacts(&content))
    }
}

/// Body of the first fenced block in `content`, preferring a ```json fence.
/// Content without fences is returned trimmed.
#[must_use]
pub fn strip_code_fences(content: &str) -> &str {
    let after_open = content
        .split_once("```json")
        .or_else(|| content.split_once("```"))
        .map(|(_, rest)| rest);

    match after_open {
        Some(rest) => rest.split("```").next().unwrap_or(rest).trim(),
        None => content.trim(),
    }
}

/// Parse a model reply into contacts. Anything but a JSON array of objects
/// yields an empty list; array elements that are not objects are skipped.
#[must_use]
pub fn parse_contacts(content: &str) -> Vec<ExtractedContact> {
    let cleaned = strip_code_fences(content);
    match serde_json::from_str::<serde_json::Value>(cleaned) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Ok(_) => {
            tracing::warn!("extraction reply was valid JSON but not an array");
            Vec::new()
        }
        Err(error) => {
            let preview: String = cleaned.chars().take(200).collect();
            tracing::warn!(%error, preview, "extraction reply was not valid JSON");
            Vec::new()
        }
    }
}
