mod helpers;

use axum::http::StatusCode;
use helpers::app::{create_classroom, enroll, make_test_app, register_student, register_teacher, request};
use serde_json::json;

#[tokio::test]
async fn health_needs_no_token() {
    let app = make_test_app().await;
    let (status, body) = request(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn material_lifecycle() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Library").await;
    let student = register_student(&app, "Student", "s@example.com").await;
    enroll(&app, &student, classroom_id, "Teacher").await;
    let base = format!("/api/classrooms/{classroom_id}/materials");

    // Students cannot create materials.
    let (status, _) = request(
        &app,
        "POST",
        &base,
        Some(&student),
        Some(json!({ "title": "Nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = request(
        &app,
        "POST",
        &base,
        Some(&teacher),
        Some(json!({
            "title": "Syllabus",
            "material_type": "pdf",
            "file_path": "https://files/syllabus.pdf"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let material_id = body["data"]["id"].as_i64().unwrap();

    // Enrolled students can read.
    let (status, body) = request(&app, "GET", &base, Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Syllabus");

    let (status, body) = request(
        &app,
        "PUT",
        &format!("{base}/{material_id}"),
        Some(&teacher),
        Some(json!({ "description": "Read before week 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "Read before week 1");
    assert_eq!(body["data"]["title"], "Syllabus");

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("{base}/{material_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        "GET",
        &format!("{base}/{material_id}"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn announcements_pin_to_the_top() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Notices").await;
    let base = format!("/api/classrooms/{classroom_id}/announcements");

    let (_, body) = request(
        &app,
        "POST",
        &base,
        Some(&teacher),
        Some(json!({ "title": "First", "content": "Older news" })),
    )
    .await;
    let first_id = body["data"]["id"].as_i64().unwrap();
    let (status, _) = request(
        &app,
        "POST",
        &base,
        Some(&teacher),
        Some(json!({ "title": "Second", "content": "Newer news" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request(
        &app,
        "PUT",
        &format!("{base}/{first_id}/pin"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(&app, "GET", &base, Some(&teacher), None).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);

    let (status, _) = request(
        &app,
        "PUT",
        &format!("{base}/{first_id}/unpin"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(&app, "GET", &base, Some(&teacher), None).await;
    assert_eq!(body["data"][0]["title"], "Second");
}
