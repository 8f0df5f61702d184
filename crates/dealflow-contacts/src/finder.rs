//! Per-company discovery: search fan-out, extraction, and batching.

use dealflow_core::AppConfig;
use futures::future::join_all;

use crate::error::ContactsError;
use crate::extract::OpenRouterClient;
use crate::linkedin::validate_linkedin_url;
use crate::search::SerperClient;
use crate::summary::{format_search_results, search_queries};
use crate::types::{Company, Contact, ExtractedContact, SearchResponse};

/// Companies processed concurrently per batch.
pub const DEFAULT_BATCH_SIZE: usize = 14;

pub struct DecisionMakerFinder {
    search: SerperClient,
    extractor: OpenRouterClient,
    batch_size: usize,
}

impl DecisionMakerFinder {
    #[must_use]
    pub fn new(search: SerperClient, extractor: OpenRouterClient, batch_size: usize) -> Self {
        Self {
            search,
            extractor,
            batch_size: batch_size.max(1),
        }
    }

    /// Build production clients from the API keys in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::MissingApiKey`] when either key is unset, or
    /// [`ContactsError::Http`] if a client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ContactsError> {
        let serper_key = config
            .serper_api_key
            .as_deref()
            .ok_or(ContactsError::MissingApiKey("SERPER_API_KEY"))?;
        let openrouter_key = config
            .openrouter_api_key
            .as_deref()
            .ok_or(ContactsError::MissingApiKey("OPENROUTER_API_KEY"))?;

        Ok(Self::new(
            SerperClient::new(serper_key, config.http_timeout_secs)?,
            OpenRouterClient::new(openrouter_key, config.http_timeout_secs)?,
            config.contacts_batch_size,
        ))
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Contacts for one company. Failed searches contribute empty sections
    /// and a failed extraction yields no contacts; neither is an error.
    pub async fn process_company(&self, company: &Company) -> Vec<Contact> {
        tracing::info!(
            company = %company.company_name,
            domain = %company.domain,
            "searching for decision makers"
        );

        let queries = search_queries(company);
        let results = join_all(queries.iter().map(|query| self.search_or_empty(query))).await;
        let summary = format_search_results(&results);

        let extracted = match self.extractor.extract_contacts(&summary).await {
            Ok(contacts) => contacts,
            Err(error) => {
                tracing::warn!(
                    company = %company.company_name,
                    %error,
                    "contact extraction failed"
                );
                Vec::new()
            }
        };

        extracted
            .into_iter()
            .map(|contact| finalize(contact, company))
            .collect()
    }

    async fn search_or_empty(&self, query: &str) -> SearchResponse {
        match self.search.search(query).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!(query, %error, "search failed");
                SearchResponse::empty_for(query)
            }
        }
    }

    /// Process every company in the slice concurrently.
    pub async fn process_batch(&self, companies: &[Company]) -> Vec<Contact> {
        join_all(companies.iter().map(|company| self.process_company(company)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Process all companies, one batch at a time, preserving input order.
    pub async fn find_all(&self, companies: &[Company]) -> Vec<Contact> {
        let total_batches = companies.len().div_ceil(self.batch_size);
        let mut contacts = Vec::new();

        for (index, batch) in companies.chunks(self.batch_size).enumerate() {
            let found = self.process_batch(batch).await;
            tracing::info!(
                batch = index + 1,
                total_batches,
                contacts = found.len(),
                "batch complete"
            );
            contacts.extend(found);
        }

        contacts
    }
}

fn finalize(contact: ExtractedContact, company: &Company) -> Contact {
    Contact {
        linkedin_url: validate_linkedin_url(&contact.linkedin_url),
        first_name: contact.first_name,
        last_name: contact.last_name,
        title: contact.title,
        generic_email: contact.generic_email,
        source_url: contact.source_url,
        company_phone: contact.company_phone,
        domain: company.domain.clone(),
        company_name: company.company_name.clone(),
    }
}
