//! Decision-maker discovery for buyer and target companies.
//!
//! For each company (domain + name) a handful of web searches are run, the
//! results are summarized, and a language model extracts named executives
//! and generic mailboxes into flat CSV rows.

pub mod error;
pub mod extract;
pub mod finder;
pub mod input;
pub mod job;
pub mod linkedin;
pub mod output;
mod prompt;
pub mod search;
pub mod summary;
pub mod types;

pub use error::ContactsError;
pub use extract::{parse_contacts, strip_code_fences, OpenRouterClient, EXTRACTION_MODEL};
pub use finder::{DecisionMakerFinder, DEFAULT_BATCH_SIZE};
pub use input::{
    output_name_for_title, read_companies, read_companies_file, InputSource, SheetRef,
    SheetsClient,
};
pub use job::{find_contacts, FindContactsSummary};
pub use linkedin::validate_linkedin_url;
pub use output::write_contacts_csv;
pub use search::SerperClient;
pub use summary::{format_search_results, search_queries, RESULTS_PER_QUERY};
pub use types::{Company, Contact, ExtractedContact, OrganicResult, SearchResponse};
