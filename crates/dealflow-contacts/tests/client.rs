//! Integration tests for the search, extraction, and sheet clients using
//! wiremock HTTP mocks.

use dealflow_contacts::{ContactsError, OpenRouterClient, SerperClient, SheetRef, SheetsClient};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "gen-1",
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

// ---------------------------------------------------------------------------
// Serper
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_sends_key_and_fixed_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", "serper-key"))
        .and(body_partial_json(serde_json::json!({
            "q": "acme.com Acme CEO",
            "gl": "us",
            "autocorrect": false,
            "num": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "searchParameters": { "q": "acme.com Acme CEO", "type": "search" },
            "organic": [
                {
                    "title": "Jane Roe - CEO - Acme",
                    "link": "https://www.linkedin.com/in/jane-roe",
                    "snippet": "Jane Roe is the CEO of Acme.",
                    "position": 1
                },
                { "title": "No link here" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SerperClient::with_base_url("serper-key", 30, &server.uri())
        .expect("client construction should not fail");
    let response = client.search("acme.com Acme CEO").await.expect("search");

    assert_eq!(response.search_parameters.q.as_deref(), Some("acme.com Acme CEO"));
    assert_eq!(response.organic.len(), 2);
    assert_eq!(response.organic[1].link, None);
}

#[tokio::test]
async fn search_error_status_is_reported_with_service_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = SerperClient::with_base_url("wrong", 30, &format!("{}/", server.uri())).unwrap();
    let err = client.search("anything").await.unwrap_err();

    match err {
        ContactsError::Api {
            service,
            status,
            body,
        } => {
            assert_eq!(service, "serper");
            assert_eq!(status, 403);
            assert_eq!(body, "bad key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// OpenRouter
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extraction_posts_bearer_request_and_parses_fenced_reply() {
    let server = MockServer::start().await;

    let reply = "```json\n[\n  {\"first_name\": \"Jane\", \"last_name\": \"Roe\", \"title\": \"CEO\", \
                 \"linkedin_url\": \"https://www.linkedin.com/in/jane-roe\", \"generic_email\": null, \
                 \"source_url\": \"https://acme.com/team\", \"company_phone\": \"\"}\n]\n```";

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer router-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "openai/gpt-4o-mini",
            "max_tokens": 4000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(reply)))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url("router-key", 30, &server.uri()).unwrap();
    let contacts = client
        .extract_contacts("**Search Query:** acme.com Acme CEO")
        .await
        .expect("extraction");

    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].first_name, "Jane");
    assert_eq!(contacts[0].generic_email, "");
    assert_eq!(contacts[0].source_url, "https://acme.com/team");
}

#[tokio::test]
async fn extraction_reply_that_is_not_an_array_yields_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("I could not find any decision makers.")),
        )
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url("router-key", 30, &server.uri()).unwrap();
    let contacts = client.extract_contacts("summary").await.unwrap();

    assert!(contacts.is_empty());
}

#[tokio::test]
async fn extraction_malformed_envelope_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = OpenRouterClient::with_base_url("router-key", 30, &server.uri()).unwrap();
    let err = client.extract_contacts("summary").await.unwrap_err();

    assert!(matches!(err, ContactsError::Deserialize { .. }));
}

// ---------------------------------------------------------------------------
// Google Sheets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sheet_export_is_parsed_into_companies() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/abc123/export"))
        .and(query_param("format", "csv"))
        .and(query_param("gid", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "Domain,Company Name,Owner\nacme.com,Acme,x\nglobex.com,Globex,y\n",
        ))
        .mount(&server)
        .await;

    let sheet = SheetRef::parse("https://docs.google.com/spreadsheets/d/abc123/edit#gid=42").unwrap();
    let client = SheetsClient::with_base_url(30, &server.uri()).unwrap();
    let companies = client.fetch_companies(&sheet).await.expect("companies");

    assert_eq!(companies.len(), 2);
    assert_eq!(companies[1].domain, "globex.com");
    assert_eq!(companies[1].company_name, "Globex");
}

#[tokio::test]
async fn private_sheet_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/private1/export"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let sheet = SheetRef::parse("https://docs.google.com/spreadsheets/d/private1/edit").unwrap();
    let client = SheetsClient::with_base_url(30, &server.uri()).unwrap();
    let err = client.fetch_companies(&sheet).await.unwrap_err();

    assert!(matches!(err, ContactsError::Api { status: 401, .. }));
}

#[tokio::test]
async fn sheet_title_strips_suffix_and_missing_page_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/abc123/edit"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Q3 Targets - Google Sheets</title></head></html>",
        ))
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url(30, &server.uri()).unwrap();

    let titled = SheetRef::parse("https://docs.google.com/spreadsheets/d/abc123/edit").unwrap();
    assert_eq!(client.fetch_title(&titled).await.as_deref(), Some("Q3 Targets"));

    let missing = SheetRef::parse("https://docs.google.com/spreadsheets/d/gone/edit").unwrap();
    assert_eq!(client.fetch_title(&missing).await, None);
}
