//! `find-contacts` command.

use std::path::PathBuf;

use dealflow_contacts::{find_contacts, DecisionMakerFinder, SheetsClient};

/// # Errors
///
/// Returns an error if an API key is missing, the input cannot be read, or
/// the output file cannot be written.
pub(crate) async fn run_find_contacts(
    config: &dealflow_core::AppConfig,
    input: &str,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let finder = DecisionMakerFinder::from_app_config(config)?;
    let sheets = SheetsClient::new(config.http_timeout_secs)?;

    let summary = find_contacts(&finder, &sheets, input, output).await?;

    match summary.output {
        Some(path) => println!(
            "found {} contact(s) across {} companies; wrote {}",
            summary.contacts,
            summary.companies,
            path.display()
        ),
        None => println!(
            "no contacts found across {} companies; nothing written",
            summary.companies
        ),
    }
    Ok(())
}
