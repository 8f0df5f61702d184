//! End-to-end run: read companies, discover contacts, write the CSV.

use std::path::PathBuf;

use crate::error::ContactsError;
use crate::finder::DecisionMakerFinder;
use crate::input::{output_name_for_title, read_companies_file, InputSource, SheetsClient};
use crate::output::write_contacts_csv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindContactsSummary {
    pub companies: usize,
    pub contacts: usize,
    /// `None` when no contacts were found and nothing was written.
    pub output: Option<PathBuf>,
}

/// Run discovery for `input` (a `.csv` path or a public Google Sheets URL).
///
/// Without an explicit `output`, sheet input is written to a file named after
/// the sheet title and file input to `output.csv`.
///
/// # Errors
///
/// Returns input and output errors; per-company search and extraction
/// failures are logged and skipped.
pub async fn find_contacts(
    finder: &DecisionMakerFinder,
    sheets: &SheetsClient,
    input: &str,
    output: Option<PathBuf>,
) -> Result<FindContactsSummary, ContactsError> {
    let (companies, output) = match InputSource::parse(input)? {
        InputSource::File(path) => {
            tracing::info!(path = %path.display(), "reading companies from file");
            let companies = read_companies_file(&path)?;
            (companies, output.unwrap_or_else(|| PathBuf::from("output.csv")))
        }
        InputSource::Sheet(sheet) => {
            tracing::info!(spreadsheet_id = %sheet.spreadsheet_id, gid = %sheet.gid, "reading companies from Google Sheet");
            let companies = sheets.fetch_companies(&sheet).await?;
            let output = match output {
                Some(path) => path,
                None => {
                    let title = sheets.fetch_title(&sheet).await;
                    PathBuf::from(output_name_for_title(title.as_deref()))
                }
            };
            (companies, output)
        }
    };

    tracing::info!(
        companies = companies.len(),
        batch_size = finder.batch_size(),
        "starting decision-maker discovery"
    );
    let contacts = finder.find_all(&companies).await;

    if contacts.is_empty() {
        tracing::info!("no contacts found");
        return Ok(FindContactsSummary {
            companies: companies.len(),
            contacts: 0,
            output: None,
        });
    }

    write_contacts_csv(&output, &contacts)?;
    tracing::info!(path = %output.display(), contacts = contacts.len(), "contacts written");

    Ok(FindContactsSummary {
        companies: companies.len(),
        contacts: contacts.len(),
        output: Some(output),
    })
}
