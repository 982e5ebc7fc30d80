#![allow(clippy::disallowed_methods)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// In-process stand-in for the jobs backend.
#[derive(Default)]
pub struct Backend {
    pub jobs: Vec<Value>,
    pub next_id: i64,
    /// Raw query string of every `GET /jobs`.
    pub list_queries: Vec<Option<String>>,
    /// Bodies received by POST and PUT.
    pub bodies: Vec<Value>,
    /// When set, `GET /jobs` answers 500 with a plain-text body.
    pub fail_list: bool,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

pub fn seed_job(id: i64, title: &str, job_type: &str, location: &str, date: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "company": "Acme",
        "location": location,
        "posting_date": date,
        "job_type": job_type,
        "tags": tags,
        "link": format!("https://acme.test/jobs/{}", id),
    })
}

/// Start the backend on an ephemeral port and return its base URL.
pub async fn spawn_backend(jobs: Vec<Value>) -> (String, SharedBackend) {
    let next_id = jobs.len() as i64 + 1;
    let backend = Arc::new(Mutex::new(Backend {
        jobs,
        next_id,
        ..Default::default()
    }));

    let app = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).put(update_job).delete(delete_job))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), backend)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Job not found"}))).into_response()
}

fn id_of(job: &Value) -> String {
    match &job["id"] {
        Value::Number(n) => n.to_string(),
        other => other.as_str().unwrap_or_default().to_string(),
    }
}

async fn list_jobs(
    State(backend): State<SharedBackend>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.list_queries.push(raw);

    if backend.fail_list {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    let mut jobs: Vec<Value> = backend
        .jobs
        .iter()
        .filter(|job| {
            params
                .get("job_type")
                .is_none_or(|t| job["job_type"].as_str() == Some(t.as_str()))
        })
        .filter(|job| {
            params.get("location").is_none_or(|l| {
                job["location"]
                    .as_str()
                    .is_some_and(|loc| loc.to_lowercase().contains(&l.to_lowercase()))
            })
        })
        .filter(|job| {
            params.get("tag").is_none_or(|tag| {
                job["tags"]
                    .as_array()
                    .is_some_and(|tags| tags.iter().any(|t| t.as_str() == Some(tag.as_str())))
            })
        })
        .cloned()
        .collect();

    jobs.sort_by(|a, b| {
        a["posting_date"]
            .as_str()
            .cmp(&b["posting_date"].as_str())
    });
    if params.get("sort").map(String::as_str) != Some("posting_date_asc") {
        jobs.reverse();
    }

    Json(Value::Array(jobs)).into_response()
}

async fn get_job(State(backend): State<SharedBackend>, Path(id): Path<String>) -> Response {
    let backend = backend.lock().unwrap();
    match backend.jobs.iter().find(|job| id_of(job) == id) {
        Some(job) => Json(job.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_job(State(backend): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.bodies.push(body.clone());

    let link = body["link"].as_str().unwrap_or_default().to_string();
    if backend.jobs.iter().any(|job| job["link"].as_str() == Some(link.as_str())) {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Link already exists"}))).into_response();
    }

    let mut job = body;
    job["id"] = json!(backend.next_id);
    backend.next_id += 1;
    backend.jobs.push(job);

    (StatusCode::CREATED, Json(json!({"message": "Job created successfully"}))).into_response()
}

async fn update_job(
    State(backend): State<SharedBackend>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = backend.lock().unwrap();
    backend.bodies.push(body.clone());

    let Some(job) = backend.jobs.iter_mut().find(|job| id_of(job) == id) else {
        return not_found();
    };
    if let (Value::Object(stored), Value::Object(changes)) = (job, body) {
        for (key, value) in changes {
            stored.insert(key, value);
        }
    }

    let updated = backend
        .jobs
        .iter()
        .find(|job| id_of(job) == id)
        .cloned()
        .unwrap_or(Value::Null);
    Json(updated).into_response()
}

async fn delete_job(State(backend): State<SharedBackend>, Path(id): Path<String>) -> Response {
    let mut backend = backend.lock().unwrap();
    let before = backend.jobs.len();
    backend.jobs.retain(|job| id_of(job) != id);
    if backend.jobs.len() == before {
        return not_found();
    }
    StatusCode::NO_CONTENT.into_response()
}
