use serde::{Deserialize, Serialize};

/// One row of the input sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Company {
    #[serde(rename = "Domain")]
    pub domain: String,
    #[serde(rename = "Company Name")]
    pub company_name: String,
}

/// A single organic hit from the search API. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
    #[serde(rename = "searchParameters", default)]
    pub search_parameters: SearchParameters,
}

impl SearchResponse {
    /// Stand-in used when a search fails, so the query still shows up in the
    /// summary handed to the extractor.
    #[must_use]
    pub fn empty_for(query: &str) -> Self {
        Self {
            organic: Vec::new(),
            search_parameters: SearchParameters {
                q: Some(query.to_string()),
            },
        }
    }
}

/// A contact as returned by the extraction model. Missing or `null` fields
/// become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtractedContact {
    #[serde(deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub linkedin_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub generic_email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub source_url: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company_phone: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Output row; field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub linkedin_url: String,
    pub generic_email: String,
    pub source_url: String,
    pub company_phone: String,
    pub domain: String,
    pub company_name: String,
}
