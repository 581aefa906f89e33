//! `ServiceClient` against a local axum stub of the job board API.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use job_board::core::config_manager::ApiConfig;
use job_board::core::{CapabilityToken, JobBoardApi, ServiceClient};
use job_board::types::{Application, JobUpdate, NewJob};
use job_board::ClientError;
use serde_json::{json, Value};

const HEADER: &str = "X-Admin-Password";
const KEY: &str = "s3cret";

#[derive(Debug, Clone)]
struct Seen {
    route: String,
    key: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Seen>>>;

fn record(log: &Log, route: &str, headers: &HeaderMap, body: Value) {
    log.lock().unwrap().push(Seen {
        route: route.to_string(),
        key: headers
            .get(HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get(HEADER).and_then(|v| v.to_str().ok()) == Some(KEY)
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response()
}

fn job_json(id: i64, title: &str, active: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "company": "Acme",
        "location": "Remote",
        "salary": null,
        "category": "IT",
        "job_type": "Full-time",
        "description": "Ship it",
        "posted_date": "2024-05-02T10:00:00",
        "is_active": active,
        "application_count": 1
    })
}

async fn list_jobs(State(log): State<Log>, headers: HeaderMap) -> Json<Value> {
    record(&log, "list_jobs", &headers, Value::Null);
    Json(json!([job_json(1, "Engineer", true)]))
}

async fn list_all(State(log): State<Log>, headers: HeaderMap) -> Response {
    record(&log, "list_all", &headers, Value::Null);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!([job_json(1, "Engineer", true), job_json(2, "Old", false)])).into_response()
}

async fn create_job(State(log): State<Log>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record(&log, "create", &headers, body);
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "id": 11, "message": "Job created successfully" })),
    )
        .into_response()
}

async fn update_job(
    State(log): State<Log>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&log, &format!("update/{}", id), &headers, body);
    Json(json!({ "message": "Job updated successfully" })).into_response()
}

async fn delete_job(State(log): State<Log>, Path(id): Path<i64>, headers: HeaderMap) -> Response {
    record(&log, &format!("delete/{}", id), &headers, Value::Null);
    (StatusCode::NOT_FOUND, "not here").into_response()
}

async fn apply(
    State(log): State<Log>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&log, &format!("apply/{}", id), &headers, body);
    if id == 500 {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" })))
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Application submitted successfully" })),
    )
        .into_response()
}

async fn stats(State(log): State<Log>, headers: HeaderMap) -> Response {
    record(&log, "stats", &headers, Value::Null);
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "total_jobs": 2,
        "active_jobs": 1,
        "total_applications": 5,
        "applications_by_status": { "pending": 4 }
    }))
    .into_response()
}

async fn applications(State(log): State<Log>, headers: HeaderMap) -> Json<Value> {
    record(&log, "applications", &headers, Value::Null);
    Json(json!([{
        "id": 1,
        "job_id": 1,
        "name": "Ada",
        "email": "ada@example.com",
        "phone": "",
        "experience": 3,
        "status": "Pending",
        "applied_date": "2024-05-03T08:00:00"
    }]))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn spawn_stub() -> (ServiceClient, Log) {
    let log: Log = Arc::default();
    let router = Router::new()
        .route("/health", get(health))
        .route("/api/jobs", get(list_jobs).post(create_job))
        .route("/api/jobs/all", get(list_all))
        .route("/api/jobs/{id}", put(update_job).delete(delete_job))
        .route("/api/jobs/{id}/apply", post(apply))
        .route("/api/stats", get(stats))
        .route("/api/applications", get(applications))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = ServiceClient::new(&ApiConfig {
        base_url: format!("http://{}/api/", addr),
        timeout_seconds: 5,
        capability_header: HEADER.to_string(),
    })
    .unwrap();
    (client, log)
}

fn token(value: &str) -> CapabilityToken {
    CapabilityToken::new(value).unwrap()
}

#[tokio::test]
async fn test_public_listing_sends_no_credential() {
    let (client, log) = spawn_stub().await;

    let jobs = client.list_jobs().await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].salary_display(), "Negotiable");
    assert_eq!(jobs[0].posted_on(), "2024-05-02");

    let seen = log.lock().unwrap();
    assert_eq!(seen[0].route, "list_jobs");
    assert_eq!(seen[0].key, None);
}

#[tokio::test]
async fn test_privileged_calls_carry_the_token() {
    let (client, log) = spawn_stub().await;

    let all = client.list_all_jobs(&token(KEY)).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(!all[1].is_active);

    let stats = client.stats(&token(KEY)).await.unwrap();
    assert_eq!(stats.total_applications, 5);
    assert_eq!(stats.pending(), Some(4));

    let seen = log.lock().unwrap();
    assert!(seen.iter().all(|s| s.key.as_deref() == Some(KEY)));
}

#[tokio::test]
async fn test_rejected_token_maps_to_unauthorized() {
    let (client, _log) = spawn_stub().await;

    let err = client.stats(&token("guess")).await.unwrap_err();
    assert_eq!(err, ClientError::http(401, "Unauthorized"));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_create_job_returns_new_id() {
    let (client, log) = spawn_stub().await;

    let job = NewJob {
        title: "Engineer".into(),
        company: "Acme".into(),
        location: "Remote".into(),
        description: "Ship it".into(),
        ..NewJob::default()
    };
    let created = client.create_job(&token(KEY), &job).await.unwrap();
    assert_eq!(created.id, 11);

    let seen = log.lock().unwrap();
    assert_eq!(seen[0].body["title"], "Engineer");
    assert_eq!(seen[0].body["salary"], "");
}

#[tokio::test]
async fn test_update_sends_only_changed_fields() {
    let (client, log) = spawn_stub().await;

    client
        .update_job(&token(KEY), 7, &JobUpdate::active(false))
        .await
        .unwrap();

    let seen = log.lock().unwrap();
    assert_eq!(seen[0].route, "update/7");
    assert_eq!(seen[0].body, json!({ "is_active": false }));
}

#[tokio::test]
async fn test_apply_posts_to_job_path() {
    let (client, log) = spawn_stub().await;

    let application = Application {
        job_id: 42,
        name: "Ada".into(),
        email: "ada@example.com".into(),
        phone: String::new(),
        experience: 3,
        resume_url: None,
        cover_letter: Some("Hello".into()),
        skills: None,
    };
    client.apply(&application).await.unwrap();

    let seen = log.lock().unwrap();
    assert_eq!(seen[0].route, "apply/42");
    assert_eq!(seen[0].key, None);
    assert_eq!(seen[0].body["cover_letter"], "Hello");
    assert!(seen[0].body.get("job_id").is_none());
}

#[tokio::test]
async fn test_error_body_message_is_used() {
    let (client, _log) = spawn_stub().await;

    let application = Application {
        job_id: 500,
        name: "Ada".into(),
        email: "ada@example.com".into(),
        ..Application::default()
    };
    let err = client.apply(&application).await.unwrap_err();
    assert_eq!(err, ClientError::http(500, "boom"));
    assert_eq!(err.to_string(), "boom");
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status() {
    let (client, _log) = spawn_stub().await;

    let err = client.delete_job(&token(KEY), 3).await.unwrap_err();
    assert_eq!(err, ClientError::http(404, "HTTP 404"));
}

#[tokio::test]
async fn test_applications_and_health() {
    let (client, _log) = spawn_stub().await;

    let records = client.applications(&token(KEY)).await.unwrap();
    assert_eq!(records[0].applied_on(), "2024-05-03");

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
}
