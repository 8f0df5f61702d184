use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the decision-maker discovery tooling.
#[derive(Debug, Error)]
pub enum ContactsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A remote API answered with a non-success status.
    #[error("{service} returned HTTP {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is not set")]
    MissingApiKey(&'static str),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid Google Sheets URL: {0}")]
    InvalidSheetUrl(String),

    #[error("unsupported input '{0}': expected a .csv file or a Google Sheets URL")]
    UnsupportedInput(String),

    #[error("input must contain 'Domain' and 'Company Name' columns")]
    MissingColumns,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
