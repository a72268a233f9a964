#![allow(dead_code)]

use std::sync::Arc;

use leadbook::{ClientConfig, HttpLeadApi, LeadController, ScriptedOperator};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Backend representation of a lead, as the server sends it.
pub fn lead_json(id: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("Lead {id}"),
        "email": format!("{id}@example.com"),
        "phone": "+90 212 000 00 00",
        "instagram": format!("https://instagram.com/{id}"),
        "sector": "Retail",
        "isContracted": false,
        "mailOpened": false,
        "replied": false,
        "__v": 0
    })
}

pub fn leads_json(count: usize) -> Vec<Value> {
    (0..count).map(|i| lead_json(&format!("lead-{i}"))).collect()
}

pub fn api(server: &MockServer) -> HttpLeadApi {
    HttpLeadApi::new(&ClientConfig::new(server.uri())).expect("valid mock server uri")
}

pub fn controller(server: &MockServer, operator: Arc<ScriptedOperator>) -> LeadController {
    LeadController::new(Arc::new(api(server)), operator, 5)
}

pub async fn mount_recent(server: &MockServer, leads: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .and(query_param("isContracted", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(leads))
        .mount(server)
        .await;
}

pub async fn mount_total(server: &MockServer, total: u64) {
    Mock::given(method("GET"))
        .and(path("/api/customers/total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total": total })))
        .mount(server)
        .await;
}

pub async fn mount_contracted(server: &MockServer, contracted: u64, uncontracted: u64) {
    for (flag, count) in [("true", contracted), ("false", uncontracted)] {
        Mock::given(method("GET"))
            .and(path("/api/customers/contracted"))
            .and(query_param("isContracted", flag))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": count })))
            .mount(server)
            .await;
    }
}

/// Number of requests the server saw with the given method and path.
pub async fn request_count(server: &MockServer, verb: &str, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == verb && r.url.path() == route)
        .count()
}
