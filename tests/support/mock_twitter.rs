#![allow(dead_code)]

use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use langolier::archive::TIMESTAMP_FORMAT;
use langolier::client::{Credentials, TwitterClient};

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Platform-formatted timestamp `days` before now.
pub fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days))
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn api_status(id: u64, days: i64) -> Value {
    json!({
        "id": id,
        "id_str": id.to_string(),
        "created_at": days_ago(days),
        "full_text": "status",
    })
}

pub fn api_repost(id: u64, days: i64) -> Value {
    let mut status = api_status(id, days);
    status["retweeted_status"] = json!({ "id": 1, "id_str": "1" });
    status
}

pub fn client_for(server: &MockServer) -> TwitterClient {
    TwitterClient::new(
        &server.uri(),
        Credentials {
            consumer_key: "ck".into(),
            consumer_secret: "cs".into(),
            access_token: "at".into(),
            access_token_secret: "ats".into(),
        },
    )
}

/// Serve `pages` in order from `endpoint`, then an empty page.
pub async fn mount_pages(server: &MockServer, endpoint: &str, pages: Vec<Vec<Value>>) {
    let mut max_id: Option<u64> = None;
    for page in pages {
        let lowest = page
            .iter()
            .filter_map(|status| status["id"].as_u64())
            .min();
        mount_page(server, endpoint, max_id, Value::Array(page)).await;
        max_id = lowest.map(|low| low - 1);
    }
    mount_page(server, endpoint, max_id, json!([])).await;
}

async fn mount_page(server: &MockServer, endpoint: &str, max_id: Option<u64>, body: Value) {
    let mock = Mock::given(method("GET")).and(path(endpoint));
    let mock = match max_id {
        Some(max) => mock.and(query_param("max_id", max.to_string())),
        None => mock.and(wiremock::matchers::query_param_is_missing("max_id")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Accept a destroy call for `id` on `endpoint_path`, exactly `times` times.
pub async fn expect_post(server: &MockServer, endpoint_path: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path(endpoint_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn fail_post(server: &MockServer, endpoint_path: &str, status: u16, code: u32) {
    Mock::given(method("POST"))
        .and(path(endpoint_path))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "errors": [{ "code": code, "message": "failure" }]
        })))
        .mount(server)
        .await;
}
