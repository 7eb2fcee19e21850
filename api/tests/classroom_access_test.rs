mod helpers;

use axum::http::StatusCode;
use helpers::app::{create_classroom, enroll, make_test_app, register_student, register_teacher, request};
use serde_json::json;

#[tokio::test]
async fn students_cannot_create_classrooms() {
    let app = make_test_app().await;
    let student = register_student(&app, "Student", "s@example.com").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/classrooms",
        Some(&student),
        Some(json!({ "title": "Not allowed" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn other_teachers_get_the_same_404_as_a_missing_classroom() {
    let app = make_test_app().await;
    let owner = register_teacher(&app, "Owner", "owner@example.com").await;
    let intruder = register_teacher(&app, "Intruder", "intruder@example.com").await;
    let classroom_id = create_classroom(&app, &owner, "Algebra").await;

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&intruder),
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (missing_status, missing_body) = request(
        &app,
        "PUT",
        "/api/classrooms/999999",
        Some(&intruder),
        Some(json!({ "title": "Hijacked" })),
    )
    .await;
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    // Masking: both answers are byte-identical.
    assert_eq!(body["message"], missing_body["message"]);
}

#[tokio::test]
async fn listing_is_scoped_by_role() {
    let app = make_test_app().await;
    let alice = register_teacher(&app, "Alice", "alice@example.com").await;
    let bob = register_teacher(&app, "Bob", "bob@example.com").await;
    create_classroom(&app, &alice, "Alice Math").await;
    create_classroom(&app, &bob, "Bob Physics").await;

    let (status, body) = request(&app, "GET", "/api/classrooms", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Alice Math"]);
}

#[tokio::test]
async fn detail_includes_class_size() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Ms Frizzle", "frizzle@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Science").await;

    let s1 = register_student(&app, "S1", "s1@example.com").await;
    let s2 = register_student(&app, "S2", "s2@example.com").await;
    enroll(&app, &s1, classroom_id, "Ms Frizzle").await;
    enroll(&app, &s2, classroom_id, "Ms Frizzle").await;

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["class_size"], 2);
}

#[tokio::test]
async fn soft_deleted_classroom_disappears_from_every_read() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Ephemeral").await;

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(&app, "GET", "/api/classrooms", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    // Deleting again answers 404: the row is already invisible.
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn date_order_is_validated() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "dates@example.com").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/classrooms",
        Some(&teacher),
        Some(json!({
            "title": "Backwards",
            "start_date": "2025-09-01",
            "end_date": "2025-08-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
