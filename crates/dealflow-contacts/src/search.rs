//! HTTP client for the Serper web-search API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::ContactsError;
use crate::types::SearchResponse;

const DEFAULT_BASE_URL: &str = "https://google.serper.dev/";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    gl: &'static str,
    autocorrect: bool,
    num: u8,
}

/// Client for the Serper search endpoint. Use [`SerperClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SerperClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl SerperClient {
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
            endpoint: join_endpoint(base_url, "search")?,
        })
    }

    /// Runs one US-localized search with ten results and autocorrect off.
    ///
    /// # Errors
    ///
    /// - [`ContactsError::Http`] on network failure.
    /// - [`ContactsError::Api`] on a non-2xx status.
    /// - [`ContactsError::Deserialize`] if the body is not a search response.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, ContactsError> {
        let request = SearchRequest {
            q: query,
            gl: "us",
            autocorrect: false,
            num: 10,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("X-API-KEY", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ContactsError::Api {
                service: "serper",
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ContactsError::Deserialize {
            context: format!("serper search(q={query})"),
            source: e,
        })
    }
}

/// `base_url` with exactly one trailing slash, joined with `path`.
pub(crate) fn join_endpoint(base_url: &str, path: &str) -> Result<Url, ContactsError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .and_then(|base| base.join(path))
        .map_err(|e| ContactsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}
