use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use ayush_history::HistoryStore;
use ayush_map::{LookupContext, MergedTable, SchemaPolicy};
use ayush_model::RawTable;
use ayush_server::{ServerConfig, ServerState, build_router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    let mut table = RawTable::new(headers.iter().map(|h| (*h).to_string()).collect());
    for row in rows {
        table.push_row(row.iter().map(|c| (*c).to_string()).collect());
    }
    table
}

fn app() -> Router {
    app_with(HistoryStore::in_memory())
}

fn app_with(history: HistoryStore) -> Router {
    let siddha = table(
        &["NAMC_CODE", "NAMC_TERM", "Short_Definition"],
        &[
            &["SA1.1", "Suram", "Fever"],
            &["SA2.4", "Kaasam", "Dry cough"],
        ],
    );
    let unani = table(
        &["NUMC_CODE", "NUMC_TERM"],
        &[&["UA-7", "Humma"], &["UB-2", "Sual yabis"]],
    );
    let merged = MergedTable::from_raw(table(
        &["Sidha_Code", "Unani_Code", "Disease"],
        &[&["SA1.1", "UA-7", "Fever"]],
    ));
    let lookup =
        LookupContext::new(&siddha, &unani, merged, SchemaPolicy::Strict).expect("context");
    let state = ServerState::new(ServerConfig::default(), lookup, history);
    build_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

#[tokio::test]
async fn root_and_health_respond() {
    let app = app();
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "AYUSH Lookup API running");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["searchable_rows"], 4);
    assert_eq!(body["tables"][0]["text_source"], "short_definition");
}

#[tokio::test]
async fn exact_lookup_carries_merged_record() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/lookup",
        Some(json!({ "disease_text": "  FEVER ", "user_id": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], 3);
    assert_eq!(body["result"]["code"], "SA1.1");
    assert_eq!(body["result"]["discipline"], "Siddha");
    assert_eq!(body["result"]["matched_by"], "exact");
    assert_eq!(body["result"]["merged"]["unani_code"], "UA-7");
}

#[tokio::test]
async fn unani_partial_match() {
    let app = app();
    let (_, body) = send(&app, "POST", "/lookup", Some(json!({ "disease_text": "yabis" }))).await;
    assert_eq!(body["result"]["discipline"], "Unani");
    assert_eq!(body["result"]["code"], "UB-2");
    assert_eq!(body["result"]["matched_by"], "partial");
    assert!(body["result"]["merged"].is_null());
    assert!(body["user_id"].is_null());
}

#[tokio::test]
async fn fuzzy_suggestions_and_no_match() {
    let app = app();
    let (_, body) = send(
        &app,
        "POST",
        "/lookup",
        Some(json!({ "disease_text": "cough dry", "fuzzy_threshold": 60 })),
    )
    .await;
    assert_eq!(
        body["result"]["error"],
        "No exact/partial match; showing fuzzy suggestions"
    );
    assert_eq!(body["result"]["suggestions"][0]["code"], "SA2.4");

    let (status, body) = send(
        &app,
        "POST",
        "/lookup",
        Some(json!({ "disease_text": "zzzz qqqq" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["error"], "No match found in Siddha or Unani.");
}

#[tokio::test]
async fn blank_lookup_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, "POST", "/lookup", Some(json!({ "disease_text": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["message"], "disease_text is required");

    let (status, _) = send(
        &app,
        "POST",
        "/lookup",
        Some(json!({ "disease_text": "fever", "fuzzy_top_k": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_login_and_profile() {
    let app = app();
    let (status, user) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "username": "meena", "email": "meena@example.org" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = user["id"].as_u64().expect("id");

    let (status, body) = send(&app, "POST", "/users", Some(json!({ "username": "meena" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, body) = send(&app, "POST", "/login", Some(json!({ "username": "meena" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, body) = send(&app, "POST", "/login", Some(json!({ "username": "ghost" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");

    let (status, body) = send(
        &app,
        "POST",
        "/save_lookup",
        Some(json!({ "user_id": id, "disease_text": "fever", "result": { "code": "SA1.1" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Lookup saved successfully");

    let (status, profile) = send(&app, "GET", &format!("/profile/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "meena");
    assert_eq!(profile["lookups"][0]["disease_text"], "fever");
    assert_eq!(profile["lookups"][0]["result"]["code"], "SA1.1");

    let (status, _) = send(&app, "GET", "/profile/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fhir_form_and_transaction() {
    let app = app();
    let (status, bundle) = send(
        &app,
        "POST",
        "/fhir_resource",
        Some(json!({
            "patient_id": "17",
            "first_name": "Arun",
            "last_name": "Kumar",
            "gender": "male",
            "birth_date": "1988-06-01",
            "condition_name": "Fever",
            "snomed_code": "386661006",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bundle["type"], "collection");
    assert_eq!(bundle["entry"].as_array().map(Vec::len), Some(2));
    assert_eq!(bundle["entry"][1]["resource"]["resourceType"], "Condition");

    let (status, body) = send(&app, "POST", "/fhir_bundle", Some(bundle)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_BUNDLE");

    let (status, body) = send(
        &app,
        "POST",
        "/fhir_bundle",
        Some(json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [{ "resource": {
                "resourceType": "Patient",
                "id": "17",
                "name": [{ "family": "Kumar", "given": ["Arun"] }],
                "gender": "male",
                "birthDate": "1988",
            }}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "transaction-response");
    assert_eq!(body["entry"][0]["response"]["location"], "Patient/17");

    let (status, body) = send(
        &app,
        "POST",
        "/fhir_bundle",
        Some(json!({
            "resourceType": "Bundle",
            "type": "transaction",
            "entry": [{ "resource": {
                "resourceType": "Patient",
                "name": [{ "family": "Kumar", "given": ["Arun"] }],
                "gender": "M",
                "birthDate": "1988",
            }}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_RESOURCE");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(&app(), "GET", "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn file_backed_history_is_written_by_handlers() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("history.json");
    let app = app_with(HistoryStore::open(&path).expect("open"));

    let (status, user) = send(&app, "POST", "/users", Some(json!({ "username": "lakshmi" }))).await;
    assert_eq!(status, StatusCode::OK);
    let id = user["id"].as_u64().expect("id");
    let (status, _) = send(
        &app,
        "POST",
        "/save_lookup",
        Some(json!({ "user_id": id, "disease_text": "cough", "result": { "code": "SA2.4" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let reopened = HistoryStore::open(&path).expect("reopen");
    let profile = reopened.profile(id).expect("profile");
    assert_eq!(profile.username, "lakshmi");
    assert_eq!(profile.lookups[0].disease_text, "cough");
}
