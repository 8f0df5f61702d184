//! End-to-end discovery runs against mocked search and extraction APIs.

use dealflow_contacts::{
    find_contacts, Company, DecisionMakerFinder, OpenRouterClient, SerperClient, SheetsClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn extraction_reply() -> serde_json::Value {
    let content = serde_json::json!([
        {
            "first_name": "Jane",
            "last_name": "Roe",
            "title": "CEO",
            "linkedin_url": "https://www.linkedin.com/company/acme",
            "generic_email": "",
            "source_url": "https://example.com/about",
            "company_phone": ""
        },
        {
            "first_name": "",
            "last_name": "",
            "title": "",
            "linkedin_url": "",
            "generic_email": "info@example.com",
            "source_url": "https://example.com/contact",
            "company_phone": "(555) 010-2000"
        }
    ])
    .to_string();

    serde_json::json!({ "choices": [{ "message": { "content": content } }] })
}

async fn mount_search(server: &MockServer, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "searchParameters": { "q": "q" },
            "organic": [{
                "title": "Leadership",
                "link": "https://example.com/about",
                "snippet": "Jane Roe, CEO"
            }]
        }))
    } else {
        ResponseTemplate::new(status)
    };
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_extraction(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(template)
        .mount(server)
        .await;
}

fn finder(server: &MockServer, batch_size: usize) -> DecisionMakerFinder {
    DecisionMakerFinder::new(
        SerperClient::with_base_url("serper-key", 30, &server.uri()).unwrap(),
        OpenRouterClient::with_base_url("router-key", 30, &server.uri()).unwrap(),
        batch_size,
    )
}

fn company(domain: &str, name: &str) -> Company {
    Company {
        domain: domain.to_string(),
        company_name: name.to_string(),
    }
}

#[tokio::test]
async fn company_contacts_carry_company_fields_and_clean_linkedin() {
    let server = MockServer::start().await;
    mount_search(&server, 200).await;
    mount_extraction(&server, ResponseTemplate::new(200).set_body_json(extraction_reply())).await;

    let contacts = finder(&server, 14)
        .process_company(&company("acme.com", "Acme"))
        .await;

    assert_eq!(contacts.len(), 2);
    assert!(contacts
        .iter()
        .all(|c| c.domain == "acme.com" && c.company_name == "Acme"));
    assert_eq!(contacts[0].first_name, "Jane");
    assert_eq!(contacts[0].linkedin_url, "");
    assert_eq!(contacts[1].generic_email, "info@example.com");

    // five searches plus one extraction
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 6);
}

#[tokio::test]
async fn failed_searches_still_reach_the_extractor() {
    let server = MockServer::start().await;
    mount_search(&server, 500).await;
    mount_extraction(&server, ResponseTemplate::new(200).set_body_json(extraction_reply())).await;

    let contacts = finder(&server, 14)
        .process_company(&company("acme.com", "Acme"))
        .await;

    assert_eq!(contacts.len(), 2);
}

#[tokio::test]
async fn extraction_failure_yields_no_contacts() {
    let server = MockServer::start().await;
    mount_search(&server, 200).await;
    mount_extraction(&server, ResponseTemplate::new(502)).await;

    let contacts = finder(&server, 14)
        .process_company(&company("acme.com", "Acme"))
        .await;

    assert!(contacts.is_empty());
}

#[tokio::test]
async fn find_all_preserves_company_order_across_batches() {
    let server = MockServer::start().await;
    mount_search(&server, 200).await;
    mount_extraction(&server, ResponseTemplate::new(200).set_body_json(extraction_reply())).await;

    let companies = vec![
        company("a.com", "A"),
        company("b.com", "B"),
        company("c.com", "C"),
    ];
    let contacts = finder(&server, 2).find_all(&companies).await;

    let domains: Vec<&str> = contacts.iter().map(|c| c.domain.as_str()).collect();
    assert_eq!(
        domains,
        vec!["a.com", "a.com", "b.com", "b.com", "c.com", "c.com"]
    );
}

#[tokio::test]
async fn zero_batch_size_is_treated_as_one() {
    let server = MockServer::start().await;
    assert_eq!(finder(&server, 0).batch_size(), 1);
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csv_file_job_writes_contacts() {
    let server = MockServer::start().await;
    mount_search(&server, 200).await;
    mount_extraction(&server, ResponseTemplate::new(200).set_body_json(extraction_reply())).await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("companies.csv");
    std::fs::write(&input, "Domain,Company Name\nacme.com,Acme\n").unwrap();
    let output = dir.path().join("contacts.csv");

    let sheets = SheetsClient::with_base_url(30, &server.uri()).unwrap();
    let summary = find_contacts(
        &finder(&server, 14),
        &sheets,
        input.to_str().unwrap(),
        Some(output.clone()),
    )
    .await
    .expect("job");

    assert_eq!(summary.companies, 1);
    assert_eq!(summary.contacts, 2);
    assert_eq!(summary.output.as_deref(), Some(output.as_path()));

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<dealflow_contacts::Contact> =
        reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].company_phone, "(555) 010-2000");
}

#[tokio::test]
async fn job_without_contacts_writes_nothing() {
    let server = MockServer::start().await;
    mount_search(&server, 200).await;
    mount_extraction(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "choices": [{ "message": { "content": "[]" } }] })),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("companies.csv");
    std::fs::write(&input, "Domain,Company Name\nacme.com,Acme\n").unwrap();
    let output = dir.path().join("contacts.csv");

    let sheets = SheetsClient::with_base_url(30, &server.uri()).unwrap();
    let summary = find_contacts(
        &finder(&server, 14),
        &sheets,
        input.to_str().unwrap(),
        Some(output.clone()),
    )
    .await
    .unwrap();

    assert_eq!(summary.contacts, 0);
    assert_eq!(summary.output, None);
    assert!(!output.exists());
}

#[tokio::test]
async fn job_rejects_missing_columns_and_unsupported_files() {
    let server = MockServer::start().await;
    let sheets = SheetsClient::with_base_url(30, &server.uri()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let input = dir.path().join("bad.csv");
    std::fs::write(&input, "Website,Name\nacme.com,Acme\n").unwrap();
    let err = find_contacts(&finder(&server, 14), &sheets, input.to_str().unwrap(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, dealflow_contacts::ContactsError::MissingColumns));

    let err = find_contacts(&finder(&server, 14), &sheets, "companies.xlsx", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        dealflow_contacts::ContactsError::UnsupportedInput(_)
    ));
}
