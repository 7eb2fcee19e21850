//! Test harness: an app wired to a fresh in-memory database, plus
//! request helpers shared by the integration suites.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use common::config::AppConfig;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Builds a full application router backed by its own in-memory
/// database. Each call gets isolated state.
pub async fn make_test_app() -> Router {
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_jwt_duration_minutes(60);

    let db = db::test_utils::setup_test_db().await;
    api::routes::routes(api::state::AppState::new(db))
}

/// Sends one request and returns `(status, parsed JSON body)`.
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Registers a teacher account and returns its login token.
pub async fn register_teacher(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "password123",
            "role": "teacher",
            "department": "Mathematics"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, email).await
}

/// Registers a student account and returns its login token.
pub async fn register_student(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": name,
            "email": email,
            "password": "password123",
            "role": "student",
            "grade_level": "10"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, email).await
}

pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_owned()
}

pub async fn create_classroom(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        "/api/classrooms",
        Some(token),
        Some(json!({ "title": title, "subject_area": "Math" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

pub async fn create_assignment(
    app: &Router,
    token: &str,
    classroom_id: i64,
    due_date: &str,
    max_points: i64,
) -> i64 {
    let (status, body) = request(
        app,
        "POST",
        &format!("/api/classrooms/{classroom_id}/assignments"),
        Some(token),
        Some(json!({
            "title": "Problem set",
            "due_date": due_date,
            "max_points": max_points
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

/// Enrolls the calling student, confirming with the teacher's name.
pub async fn enroll(
    app: &Router,
    token: &str,
    classroom_id: i64,
    teacher_name: &str,
) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        &format!("/api/classrooms/{classroom_id}/enrollments"),
        Some(token),
        Some(json!({ "teacher_name": teacher_name })),
    )
    .await
}

pub async fn submit(
    app: &Router,
    token: &str,
    classroom_id: i64,
    assignment_id: i64,
    link: &str,
) -> (StatusCode, Value) {
    request(
        app,
        "POST",
        &format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions"),
        Some(token),
        Some(json!({ "link": link })),
    )
    .await
}
