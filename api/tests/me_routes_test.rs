mod helpers;

use axum::http::StatusCode;
use helpers::app::{
    create_assignment, create_classroom, enroll, make_test_app, register_student,
    register_teacher, request,
};
use serde_json::json;

#[tokio::test]
async fn teacher_dashboard_aggregates_owned_classrooms() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let c1 = create_classroom(&app, &teacher, "Algebra").await;
    let c2 = create_classroom(&app, &teacher, "Geometry").await;
    create_assignment(&app, &teacher, c1, "2099-01-01T00:00:00Z", 100).await;
    create_assignment(&app, &teacher, c2, "2099-06-01T00:00:00Z", 100).await;
    request(
        &app,
        "POST",
        &format!("/api/classrooms/{c1}/materials"),
        Some(&teacher),
        Some(json!({ "title": "Syllabus" })),
    )
    .await;
    request(
        &app,
        "POST",
        &format!("/api/classrooms/{c2}/announcements"),
        Some(&teacher),
        Some(json!({ "title": "Welcome", "content": "First lecture on Monday" })),
    )
    .await;

    let student = register_student(&app, "Student", "s@example.com").await;
    enroll(&app, &student, c1, "Teacher").await;
    enroll(&app, &student, c2, "Teacher").await;

    let (status, body) = request(&app, "GET", "/api/me/dashboard", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "teacher");
    assert_eq!(body["data"]["classroom_count"], 2);
    // One student in two classrooms still counts once.
    assert_eq!(body["data"]["student_count"], 1);
    assert_eq!(body["data"]["assignment_count"], 2);
    assert_eq!(body["data"]["material_count"], 1);
    assert_eq!(body["data"]["announcement_count"], 1);

    let summaries = body["data"]["classrooms"].as_array().unwrap();
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|c| c["student_count"] == 1));

    let recent = body["data"]["recent_activity"].as_array().unwrap();
    assert_eq!(recent.len(), 4);
    // Created last, so it leads the feed.
    assert_eq!(recent[0]["kind"], "announcement");
    assert_eq!(recent[0]["title"], "Welcome");
    let kinds: Vec<&str> = recent.iter().map(|r| r["kind"].as_str().unwrap()).collect();
    assert!(kinds.contains(&"assignment"));
    assert!(kinds.contains(&"material"));
}

#[tokio::test]
async fn student_dashboard_lists_classrooms_and_upcoming_work() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Physics").await;
    create_assignment(&app, &teacher, classroom_id, "2099-01-01T00:00:00Z", 100).await;
    create_assignment(&app, &teacher, classroom_id, "2020-01-01T00:00:00Z", 100).await;

    let student = register_student(&app, "Student", "s@example.com").await;
    enroll(&app, &student, classroom_id, "Teacher").await;

    let (status, body) = request(&app, "GET", "/api/me/dashboard", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "student");
    let classrooms = body["data"]["classrooms"].as_array().unwrap();
    assert_eq!(classrooms.len(), 1);
    assert_eq!(classrooms[0]["teacher_name"], "Teacher");
    // Past-due work never shows as upcoming.
    assert_eq!(
        body["data"]["upcoming_assignments"].as_array().unwrap().len(),
        1
    );
}

#[tokio::test]
async fn upcoming_assignments_are_sorted_soonest_first() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Deadlines").await;
    create_assignment(&app, &teacher, classroom_id, "2099-06-01T00:00:00Z", 100).await;
    create_assignment(&app, &teacher, classroom_id, "2099-01-01T00:00:00Z", 100).await;

    let (status, body) = request(
        &app,
        "GET",
        "/api/me/assignments/upcoming",
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let due_dates: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["due_date"].as_str().unwrap())
        .collect();
    assert_eq!(due_dates.len(), 2);
    assert!(due_dates[0] < due_dates[1]);
}

#[tokio::test]
async fn my_enrollments_hide_soft_deleted_classrooms() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let keep = create_classroom(&app, &teacher, "Keeper").await;
    let doomed = create_classroom(&app, &teacher, "Doomed").await;

    let student = register_student(&app, "Student", "s@example.com").await;
    enroll(&app, &student, keep, "Teacher").await;
    enroll(&app, &student, doomed, "Teacher").await;

    request(
        &app,
        "DELETE",
        &format!("/api/classrooms/{doomed}"),
        Some(&teacher),
        None,
    )
    .await;

    let (status, body) = request(&app, "GET", "/api/me/enrollments", Some(&student), None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["classroom"]["title"], "Keeper");

    // Teachers have no enrollments view.
    let (status, _) = request(&app, "GET", "/api/me/enrollments", Some(&teacher), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn profile_update_is_role_aware_and_partial() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let student = register_student(&app, "Student", "s@example.com").await;

    let (status, body) = request(
        &app,
        "PUT",
        "/api/me/profile",
        Some(&teacher),
        Some(json!({ "department": "Physics" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["department"], "Physics");

    let (status, body) = request(
        &app,
        "PUT",
        "/api/me/profile",
        Some(&student),
        Some(json!({ "enrollment_year": 2026 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enrollment_year"], 2026);
    // Untouched fields keep their registration values.
    assert_eq!(body["data"]["grade_level"], "10");
}
