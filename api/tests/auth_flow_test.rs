mod helpers;

use axum::http::StatusCode;
use helpers::app::{make_test_app, register_teacher, request};
use serde_json::json;

#[tokio::test]
async fn register_login_and_me_round_trip() {
    let app = make_test_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "password": "password123",
            "role": "teacher",
            "department": "Computer Science"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "grace@example.com");
    assert_eq!(body["data"]["role"], "teacher");
    assert!(body["data"]["password_hash"].is_null());

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "grace@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_owned();

    let (status, body) = request(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Grace Hopper");
    assert_eq!(
        body["data"]["teacher_profile"]["department"],
        "Computer Science"
    );
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let app = make_test_app().await;
    register_teacher(&app, "First", "dup@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Second",
            "email": "dup@example.com",
            "password": "password123",
            "role": "student"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn weak_passwords_are_rejected() {
    let app = make_test_app().await;

    // Long enough but all letters, all digits, then too short.
    for password in ["aaaaaaaa", "12345678", "abc1"] {
        let (status, body) = request(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Weak",
                "email": "weak@example.com",
                "password": password,
                "role": "student"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "password {password:?}");
        assert_eq!(body["success"], false);
    }

    // A letter and a digit together pass.
    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Strong",
            "email": "strong@example.com",
            "password": "abcd1234",
            "role": "student"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let app = make_test_app().await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Nobody",
            "email": "nobody@example.com",
            "password": "password123",
            "role": "principal"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_answer_identically() {
    let app = make_test_app().await;
    register_teacher(&app, "Teacher", "t@example.com").await;

    let (status_wrong, body_wrong) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "t@example.com", "password": "not-the-password" })),
    )
    .await;
    let (status_unknown, body_unknown) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "password123" })),
    )
    .await;

    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body_wrong["message"], body_unknown["message"]);
}

#[tokio::test]
async fn protected_routes_reject_missing_and_garbage_tokens() {
    let app = make_test_app().await;

    let (status, _) = request(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, "GET", "/api/auth/me", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn check_reports_claims_without_touching_db() {
    let app = make_test_app().await;
    let token = register_teacher(&app, "Teacher", "check@example.com").await;

    let (status, body) = request(&app, "GET", "/api/auth/check", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "teacher");
    assert!(body["data"]["user_id"].as_i64().unwrap() > 0);
}
