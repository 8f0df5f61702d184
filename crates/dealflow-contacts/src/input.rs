//! Company lists from local CSV files or public Google Sheets.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, Url};

use crate::error::ContactsError;
use crate::search::join_endpoint;
use crate::types::Company;

const DEFAULT_SHEETS_BASE_URL: &str = "https://docs.google.com/";
const DOMAIN_COLUMN: &str = "Domain";
const COMPANY_COLUMN: &str = "Company Name";
const DEFAULT_OUTPUT_STEM: &str = "output";

static SPREADSHEET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("valid regex"));
static SHEET_GID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#&]gid=(\d+)").expect("valid regex"));
static HTML_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>([^<]+)</title>").expect("valid regex"));
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Where the company list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Sheet(SheetRef),
}

impl InputSource {
    /// Anything starting with `http` is treated as a Google Sheets URL;
    /// otherwise the input must be a `.csv` path.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::InvalidSheetUrl`] for a URL without a
    /// spreadsheet id, or [`ContactsError::UnsupportedInput`] for non-CSV files.
    pub fn parse(input: &str) -> Result<Self, ContactsError> {
        if input.starts_with("http") {
            return SheetRef::parse(input).map(Self::Sheet);
        }

        let path = PathBuf::from(input);
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Ok(Self::File(path))
        } else {
            Err(ContactsError::UnsupportedInput(input.to_string()))
        }
    }
}

/// A Google Sheets document and tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub spreadsheet_id: String,
    /// Tab id; `0` is the first sheet.
    pub gid: String,
}

impl SheetRef {
    /// # Errors
    ///
    /// Returns [`ContactsError::InvalidSheetUrl`] when the URL has no `/d/<id>`.
    pub fn parse(url: &str) -> Result<Self, ContactsError> {
        let spreadsheet_id = SPREADSHEET_ID
            .captures(url)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ContactsError::InvalidSheetUrl(url.to_string()))?;
        let gid = SHEET_GID
            .captures(url)
            .and_then(|cap| cap.get(1))
            .map_or_else(|| "0".to_string(), |m| m.as_str().to_string());

        Ok(Self {
            spreadsheet_id,
            gid,
        })
    }

    fn export_path(&self) -> String {
        format!(
            "spreadsheets/d/{}/export?format=csv&gid={}",
            self.spreadsheet_id, self.gid
        )
    }

    fn edit_path(&self) -> String {
        format!("spreadsheets/d/{}/edit", self.spreadsheet_id)
    }
}

/// Parse company rows from CSV with `Domain` and `Company Name` headers.
/// Other columns are ignored.
///
/// # Errors
///
/// Returns [`ContactsError::MissingColumns`] when either header is absent, or
/// [`ContactsError::Csv`] for malformed rows.
pub fn read_companies<R: Read>(reader: R) -> Result<Vec<Company>, ContactsError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?;
    let has = |name: &str| headers.iter().any(|h| h == name);
    if !has(DOMAIN_COLUMN) || !has(COMPANY_COLUMN) {
        return Err(ContactsError::MissingColumns);
    }

    csv_reader
        .deserialize::<Company>()
        .map(|row| row.map_err(ContactsError::from))
        .collect()
}

/// # Errors
///
/// Returns [`ContactsError::Io`] if the file cannot be opened, otherwise the
/// errors of [`read_companies`].
pub fn read_companies_file(path: &Path) -> Result<Vec<Company>, ContactsError> {
    let file = std::fs::File::open(path).map_err(|source| ContactsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_companies(file)
}

/// Output file name derived from a sheet title: punctuation removed, spaces
/// turned into underscores, `.csv` appended. Falls back to `output.csv`.
#[must_use]
pub fn output_name_for_title(title: Option<&str>) -> String {
    let stem = title
        .map(|t| {
            UNSAFE_FILENAME_CHARS
                .replace_all(t, "")
                .trim()
                .replace(' ', "_")
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_OUTPUT_STEM.to_string());
    format!("{stem}.csv")
}

/// Reads public Google Sheets through their CSV export.
pub struct SheetsClient {
    client: Client,
    base_url: String,
}

impl SheetsClient {
    /// # Errors
    ///
    /// Returns [`ContactsError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, ContactsError> {
        Self::with_base_url(timeout_secs, DEFAULT_SHEETS_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ContactsError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ContactsError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, ContactsError> {
        join_endpoint(base_url, "")?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ContactsError> {
        join_endpoint(&self.base_url, path)
    }

    /// Download the sheet's CSV export and parse its company rows.
    ///
    /// # Errors
    ///
    /// - [`ContactsError::Http`] on network failure.
    /// - [`ContactsError::Api`] on a non-2xx status (private sheets answer
    ///   with a redirect to a login page or an error).
    /// - the errors of [`read_companies`].
    pub async fn fetch_companies(&self, sheet: &SheetRef) -> Result<Vec<Company>, ContactsError> {
        let response = self.client.get(self.url(&sheet.export_path())?).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ContactsError::Api {
                service: "google sheets",
                status: status.as_u16(),
                body,
            });
        }
        read_companies(body.as_bytes())
    }

    /// Document title from the sheet's HTML page, without the
    /// " - Google Sheets" suffix. Failures are logged and yield `None`.
    pub async fn fetch_title(&self, sheet: &SheetRef) -> Option<String> {
        let html = match self.fetch_edit_page(sheet).await {
            Ok(html) => html,
            Err(error) => {
                tracing::warn!(%error, "could not read sheet title");
                return None;
            }
        };

        HTML_TITLE
            .captures(&html)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().replace(" - Google Sheets", "").trim().to_string())
            .filter(|title| !title.is_empty())
    }

    async fn fetch_edit_page(&self, sheet: &SheetRef) -> Result<String, ContactsError> {
        let response = self
            .client
            .get(self.url(&sheet.edit_path())?)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_url_with_hash_gid() {
        let sheet = SheetRef::parse(
            "https://docs.google.com/spreadsheets/d/1AbC-d_EF/edit#gid=123456",
        )
        .unwrap();
        assert_eq!(sheet.spreadsheet_id, "1AbC-d_EF");
        assert_eq!(sheet.gid, "123456");
    }

    #[test]
    fn sheet_url_with_query_gid_and_default() {
        let query = SheetRef::parse("https://docs.google.com/spreadsheets/d/abc/edit?usp=sharing&gid=7")
            .unwrap();
        assert_eq!(query.gid, "7");

        let plain = SheetRef::parse("https://docs.google.com/spreadsheets/d/abc/edit").unwrap();
        assert_eq!(plain.gid, "0");
        assert_eq!(
            plain.export_path(),
            "spreadsheets/d/abc/export?format=csv&gid=0"
        );
    }

    #[test]
    fn sheet_url_without_id_is_rejected() {
        let err = SheetRef::parse("https://docs.google.com/spreadsheets/").unwrap_err();
        assert!(matches!(err, ContactsError::InvalidSheetUrl(_)));
    }

    #[test]
    fn input_source_dispatch() {
        assert_eq!(
            InputSource::parse("companies.CSV").unwrap(),
            InputSource::File(PathBuf::from("companies.CSV"))
        );
        assert!(matches!(
            InputSource::parse("https://docs.google.com/spreadsheets/d/xyz/edit").unwrap(),
            InputSource::Sheet(_)
        ));
        assert!(matches!(
            InputSource::parse("companies.xlsx"),
            Err(ContactsError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn reads_companies_ignoring_extra_columns() {
        let csv = "Company Name,Domain,Notes\nAcme HVAC,acmehvac.com,warm\nBlue Ridge,blueridge.io,\n";
        let companies = read_companies(csv.as_bytes()).unwrap();
        assert_eq!(
            companies,
            vec![
                Company {
                    domain: "acmehvac.com".to_string(),
                    company_name: "Acme HVAC".to_string(),
                },
                Company {
                    domain: "blueridge.io".to_string(),
                    company_name: "Blue Ridge".to_string(),
                },
            ]
        );
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = read_companies("Domain,Name\nacme.com,Acme\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ContactsError::MissingColumns));
    }

    #[test]
    fn output_names_are_sanitized() {
        assert_eq!(
            output_name_for_title(Some("Q3 Targets: HVAC (East)")),
            "Q3_Targets_HVAC_East.csv"
        );
        assert_eq!(output_name_for_title(Some("!!!")), "output.csv");
        assert_eq!(output_name_for_title(None), "output.csv");
    }
}
