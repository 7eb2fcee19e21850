mod helpers;

use axum::{Router, http::StatusCode};
use helpers::app::{
    create_assignment, create_classroom, enroll, make_test_app, register_student,
    register_teacher, request, submit,
};
use serde_json::json;

const FUTURE_DUE: &str = "2099-01-01T00:00:00Z";
const PAST_DUE: &str = "2020-01-01T00:00:00Z";

async fn classroom_with_student(app: &Router) -> (String, String, i64) {
    let teacher = register_teacher(app, "Teacher", "teacher@example.com").await;
    let classroom_id = create_classroom(app, &teacher, "Homework Lab").await;
    let student = register_student(app, "Student", "student@example.com").await;
    let (status, _) = enroll(app, &student, classroom_id, "Teacher").await;
    assert_eq!(status, StatusCode::CREATED);
    (teacher, student, classroom_id)
}

#[tokio::test]
async fn submit_grade_and_statistics_round_trip() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 100).await;

    let (status, body) = submit(&app, &student, classroom_id, assignment_id, "https://work").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_late"], false);
    assert_eq!(body["data"]["status"], "submitted");
    let submission_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = request(
        &app,
        "POST",
        &format!(
            "/api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/{submission_id}/grade"
        ),
        Some(&teacher),
        Some(json!({ "score": 95, "feedback": "Nice work" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["score"], 95);
    assert_eq!(body["data"]["status"], "graded");
    assert_eq!(body["data"]["feedback"], "Nice work");

    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/statistics"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_submissions"], 1);
    assert_eq!(body["data"]["graded_submissions"], 1);
    assert_eq!(body["data"]["late_submissions"], 0);
    assert_eq!(body["data"]["average_grade"], 95.0);
    assert_eq!(body["data"]["completion_percent"], 100.0);
    assert_eq!(body["data"]["graded_percent"], 100.0);
}

#[tokio::test]
async fn first_submission_after_due_is_accepted_but_late() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, PAST_DUE, 100).await;

    let (status, body) = submit(&app, &student, classroom_id, assignment_id, "https://late").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["is_late"], true);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/statistics"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(body["data"]["late_submissions"], 1);
    // Nothing graded yet, so the mean reads zero rather than null.
    assert_eq!(body["data"]["average_grade"], 0.0);
}

#[tokio::test]
async fn scores_outside_bounds_are_rejected() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 50).await;

    let (_, body) = submit(&app, &student, classroom_id, assignment_id, "https://work").await;
    let submission_id = body["data"]["id"].as_i64().unwrap();
    let grade_uri = format!(
        "/api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/{submission_id}/grade"
    );

    for bad_score in [-1, 51] {
        let (status, body) = request(
            &app,
            "POST",
            &grade_uri,
            Some(&teacher),
            Some(json!({ "score": bad_score })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Score must be between 0 and 50");
    }

    // Inclusive bounds: both extremes are valid.
    let (status, _) = request(
        &app,
        "POST",
        &grade_uri,
        Some(&teacher),
        Some(json!({ "score": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn resubmission_overwrites_before_due_and_conflicts_after() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;

    // Before the due date: resubmission overwrites and clears the grade.
    let open_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 100).await;
    let (_, body) = submit(&app, &student, classroom_id, open_id, "https://v1").await;
    let submission_id = body["data"]["id"].as_i64().unwrap();
    request(
        &app,
        "POST",
        &format!(
            "/api/classrooms/{classroom_id}/assignments/{open_id}/submissions/{submission_id}/grade"
        ),
        Some(&teacher),
        Some(json!({ "score": 40 })),
    )
    .await;

    let (status, body) = submit(&app, &student, classroom_id, open_id, "https://v2").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"].as_i64().unwrap(), submission_id);
    assert_eq!(body["data"]["link"], "https://v2");
    assert!(body["data"]["score"].is_null());
    assert_eq!(body["data"]["status"], "submitted");

    // After the due date: the first (late) submission stands, the second
    // answers 409.
    let closed_id = create_assignment(&app, &teacher, classroom_id, PAST_DUE, 100).await;
    let (status, _) = submit(&app, &student, classroom_id, closed_id, "https://only").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = submit(&app, &student, classroom_id, closed_id, "https://again").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bulk_grade_reports_failures_without_aborting() {
    let app = make_test_app().await;
    let teacher = register_teacher(&app, "Teacher", "teacher@example.com").await;
    let classroom_id = create_classroom(&app, &teacher, "Bulk").await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 100).await;

    let mut submission_ids = Vec::new();
    for i in 0..2 {
        let student = register_student(&app, "Student", &format!("s{i}@example.com")).await;
        enroll(&app, &student, classroom_id, "Teacher").await;
        let (_, body) = submit(&app, &student, classroom_id, assignment_id, "https://w").await;
        submission_ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (status, body) = request(
        &app,
        "POST",
        &format!(
            "/api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/bulk-grade"
        ),
        Some(&teacher),
        Some(json!({
            "submission_ids": [submission_ids[0], submission_ids[1], 999999],
            "score": 80,
            "feedback": "Group feedback"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["success_count"], 2);
    assert_eq!(body["data"]["failed_ids"], json!([999999]));

    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/statistics"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(body["data"]["graded_submissions"], 2);
    assert_eq!(body["data"]["average_grade"], 80.0);
}

#[tokio::test]
async fn grading_another_teachers_classroom_is_masked_as_404() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 100).await;
    let (_, body) = submit(&app, &student, classroom_id, assignment_id, "https://w").await;
    let submission_id = body["data"]["id"].as_i64().unwrap();

    let rival = register_teacher(&app, "Rival", "rival@example.com").await;
    let (status, _) = request(
        &app,
        "POST",
        &format!(
            "/api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions/{submission_id}/grade"
        ),
        Some(&rival),
        Some(json!({ "score": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn withdraw_hides_the_submission_and_resubmit_revives_it() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 100).await;
    let (_, body) = submit(&app, &student, classroom_id, assignment_id, "https://v1").await;
    let submission_id = body["data"]["id"].as_i64().unwrap();
    let base = format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions");

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("{base}/{submission_id}"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&app, "GET", &format!("{base}/my"), Some(&student), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/statistics"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(body["data"]["total_submissions"], 0);

    // Resubmitting reuses the same row.
    let (status, body) = submit(&app, &student, classroom_id, assignment_id, "https://v2").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"].as_i64().unwrap(), submission_id);
}

#[tokio::test]
async fn students_only_see_their_own_submissions() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 100).await;
    let (_, body) = submit(&app, &student, classroom_id, assignment_id, "https://mine").await;
    let submission_id = body["data"]["id"].as_i64().unwrap();

    let peer = register_student(&app, "Peer", "peer@example.com").await;
    enroll(&app, &peer, classroom_id, "Teacher").await;

    let base = format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/submissions");

    let (status, _) = request(
        &app,
        "GET",
        &format!("{base}/{submission_id}"),
        Some(&peer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(
        &app,
        "GET",
        &format!("{base}/{submission_id}"),
        Some(&student),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["link"], "https://mine");

    // The owner's list view names the submitting student.
    let (status, body) = request(&app, "GET", &base, Some(&teacher), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["student_name"], "Student");

    // Students cannot list everyone's submissions.
    let (status, _) = request(&app, "GET", &base, Some(&student), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn due_date_edits_relabel_lateness_on_read() {
    let app = make_test_app().await;
    let (teacher, student, classroom_id) = classroom_with_student(&app).await;
    let assignment_id = create_assignment(&app, &teacher, classroom_id, FUTURE_DUE, 100).await;
    submit(&app, &student, classroom_id, assignment_id, "https://w").await;

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}"),
        Some(&teacher),
        Some(json!({ "due_date": PAST_DUE })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = request(
        &app,
        "GET",
        &format!("/api/classrooms/{classroom_id}/assignments/{assignment_id}/statistics"),
        Some(&teacher),
        None,
    )
    .await;
    assert_eq!(body["data"]["late_submissions"], 1);
}
