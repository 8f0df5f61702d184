//! Search queries per company and the text summary handed to the extractor.

use crate::types::{Company, SearchResponse};

/// Organic results kept per query in the summary.
pub const RESULTS_PER_QUERY: usize = 4;

const RESULT_SEPARATOR: &str = "\n---\n";
const SECTION_SEPARATOR: &str = "\n\n\n";
const EXCLUDED_DIRECTORIES: &str = "-zoominfo -dnb";

/// The five searches run for every company: four role searches that skip
/// data-broker sites, then a contact-email search.
#[must_use]
pub fn search_queries(company: &Company) -> Vec<String> {
    let subject = format!("{} {}", company.domain, company.company_name);
    vec![
        format!("{subject} CEO {EXCLUDED_DIRECTORIES}"),
        format!("{subject} Founder owner {EXCLUDED_DIRECTORIES}"),
        format!("{subject} president chairman {EXCLUDED_DIRECTORIES}"),
        format!("{subject} partner {EXCLUDED_DIRECTORIES}"),
        format!("{subject} contact email"),
    ]
}

/// Render search responses as `**Search Query:**` sections. Only results
/// carrying a title, link and snippet are shown, at most
/// [`RESULTS_PER_QUERY`] per section.
#[must_use]
pub fn format_search_results(results: &[SearchResponse]) -> String {
    results
        .iter()
        .map(format_section)
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

fn format_section(result: &SearchResponse) -> String {
    let query = result
        .search_parameters
        .q
        .as_deref()
        .unwrap_or("(No query found)");

    let items: Vec<String> = result
        .organic
        .iter()
        .take(RESULTS_PER_QUERY)
        .filter_map(|item| {
            let (Some(title), Some(link), Some(snippet)) = (&item.title, &item.link, &item.snippet)
            else {
                return None;
            };
            Some(format!("- {title}\n  {link}\n  {snippet}"))
        })
        .collect();

    format!("**Search Query:** {query}\n\n{}", items.join(RESULT_SEPARATOR))
}
