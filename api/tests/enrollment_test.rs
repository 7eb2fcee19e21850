mod helpers;

use axum::http::StatusCode;
use helpers::app::{create_classroom, enroll, make_test_app, register_student, register_teacher, request};

#[tokio::test]
async fn enrollment_requires_matching_teacher_name() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Ada Lovelace", "ada@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Programming").await;
    let student = register_student(&app, "Student", "s@example.com").await;

    let (status, _) = enroll(&app, &student, classroom_id, "Charles Babbage").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Case-insensitive match succeeds.
    let (status, body) = enroll(&app, &student, classroom_id, "ada lovelace").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "active");
}

#[tokio::test]
async fn duplicate_enrollment_conflicts() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Math").await;
    let student = register_student(&app, "Student", "s@example.com").await;

    let (status, _) = enroll(&app, &student, classroom_id, "Teacher").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = enroll(&app, &student, classroom_id, "Teacher").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn enrolling_into_a_missing_classroom_is_404() {
    let app = make_test_app().await;
    register_teacher(&app, "Teacher", "t@example.com").await;
    let student = register_student(&app, "Student", "s@example.com").await;

    let (status, _) = enroll(&app, &student, 424242, "Teacher").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unenrolled_students_cannot_see_classroom_content() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Secret Society").await;
    let outsider = register_student(&app, "Outsider", "out@example.com").await;

    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&outsider),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/assignments"),
        Some(&outsider),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn drop_then_reenroll_reactivates_and_class_size_follows() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Churn").await;
    let student = register_student(&app, "Student", "s@example.com").await;

    let (_, body) = enroll(&app, &student, classroom_id, "Teacher").await;
    let student_id = body["data"]["student_id"].as_i64().unwrap();

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/api/classrooms/{classroom_id}/enrollments/{student_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(body["data"]["class_size"], 0);

    // A dropped student no longer passes the membership guard.
    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = enroll(&app, &student, classroom_id, "Teacher").await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(body["data"]["class_size"], 1);
}

#[tokio::test]
async fn roster_is_owner_only_and_lists_active_students() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "t@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Roster").await;
    let student = register_student(&app, "Enrolled Student", "s@example.com").await;
    enroll(&app, &student, classroom_id, "Teacher").await;

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/enrollments"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let roster = body["data"].as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["name"], "Enrolled Student");

    // Students cannot read the roster; role gate answers first.
    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/enrollments"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
