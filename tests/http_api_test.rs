mod common;

use assert_matches::assert_matches;
use leadbook::{
    models::{LeadUpdate, NewLead},
    ClientConfig, ClientError, HttpLeadApi, LeadApi,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use common::{api, lead_json};

fn new_lead() -> NewLead {
    NewLead {
        name: "Mert Yilmaz".to_string(),
        email: "mert@example.com".to_string(),
        phone: "+90 555 111 22 33".to_string(),
        instagram: "https://instagram.com/mert".to_string(),
        sector: "Tourism".to_string(),
    }
}

#[tokio::test]
async fn list_leads_filters_by_flag_and_keeps_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .and(query_param("isContracted", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(vec![lead_json("b"), lead_json("a")]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let leads = api(&server).list_leads(true).await.unwrap();

    let ids: Vec<_> = leads.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
    assert_eq!(leads[0].sector, "Retail");
}

#[tokio::test]
async fn counts_are_read_from_their_envelopes() {
    let server = MockServer::start().await;
    common::mount_total(&server, 42).await;
    common::mount_contracted(&server, 10, 32).await;
    let api = api(&server);

    assert_eq!(api.total_count().await.unwrap(), 42);
    assert_eq!(api.contracted_count(true).await.unwrap(), 10);
    assert_eq!(api.contracted_count(false).await.unwrap(), 32);
}

#[tokio::test]
async fn search_sends_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search-customers"))
        .and(query_param("query", "ali veli"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let results = api(&server).search_leads("ali veli").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn create_posts_the_five_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/instagram"))
        .and(body_json(json!({
            "name": "Mert Yilmaz",
            "email": "mert@example.com",
            "phone": "+90 555 111 22 33",
            "instagram": "https://instagram.com/mert",
            "sector": "Tourism"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(lead_json("new")))
        .expect(1)
        .mount(&server)
        .await;

    api(&server).create_lead(&new_lead()).await.unwrap();
}

#[tokio::test]
async fn create_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/instagram"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Email already registered" })),
        )
        .mount(&server)
        .await;

    let err = api(&server).create_lead(&new_lead()).await.unwrap_err();
    assert_matches!(err, ClientError::Validation(ref msg) if msg == "Email already registered");
}

#[tokio::test]
async fn create_rejection_without_body_is_a_plain_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/instagram"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = api(&server).create_lead(&new_lead()).await.unwrap_err();
    assert_matches!(err, ClientError::Status(400));
}

#[tokio::test]
async fn create_needs_201_to_count_as_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/instagram"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = api(&server).create_lead(&new_lead()).await.unwrap_err();
    assert_matches!(err, ClientError::UnexpectedStatus(200));
}

#[tokio::test]
async fn create_server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/instagram"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api(&server).create_lead(&new_lead()).await.unwrap_err();
    assert_matches!(err, ClientError::Status(500));
}

#[tokio::test]
async fn update_puts_only_present_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/customers/65f0aa"))
        .and(body_json(json!({ "isContracted": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    api(&server)
        .update_lead("65f0aa", &LeadUpdate::contacted())
        .await
        .unwrap();
}

#[tokio::test]
async fn update_failure_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/customers/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = api(&server)
        .update_lead("missing", &LeadUpdate::contacted())
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Status(404));
}

#[tokio::test]
async fn malformed_list_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = api(&server).list_leads(false).await.unwrap_err();
    assert_matches!(err, ClientError::Decode(_));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let api = HttpLeadApi::new(&ClientConfig::new("http://127.0.0.1:1")).unwrap();

    let err = api.total_count().await.unwrap_err();
    assert_matches!(err, ClientError::Network(_));
}
