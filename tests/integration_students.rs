mod common;

use axum::http::StatusCode;
use common::{create_test_user, get_auth_token, json_request, response_json, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn admin_token(pool: &PgPool) -> String {
    let admin = create_test_user(pool, "Course Admin", "adminpass123", true).await;
    let app = setup_test_app(pool.clone()).await;
    get_auth_token(app, &admin.email, "adminpass123").await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_as_admin(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = json_request(
        "POST",
        "/api/students",
        Some(&token),
        Some(json!({
            "student_id": "S-1001",
            "name": "Grace Hopper",
            "email": "grace@uni.edu",
            "password": "studentpass123"
        })),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["student_id"], "S-1001");
    assert_eq!(body["name"], "Grace Hopper");
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_forbidden_for_regular_user(pool: PgPool) {
    let user = create_test_user(&pool, "Regular User", "password123", false).await;
    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &user.email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let request = json_request("GET", "/api/students", Some(&token), None);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_unauthorized_without_token(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let request = json_request("GET", "/api/students", None, None);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_student_id_conflict(pool: PgPool) {
    let token = admin_token(&pool).await;

    let create = json!({
        "student_id": "S-1001",
        "name": "Grace Hopper",
        "email": "grace@uni.edu",
        "password": "studentpass123"
    });

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students",
            Some(&token),
            Some(create),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students",
            Some(&token),
            Some(json!({
                "student_id": "S-1001",
                "name": "Another Student",
                "email": "other@uni.edu",
                "password": "studentpass123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Student ID already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_partial(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students",
            Some(&token),
            Some(json!({
                "student_id": "S-1001",
                "name": "Grace Hopper",
                "email": "grace@uni.edu",
                "password": "studentpass123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/students/S-1001",
            Some(&token),
            Some(json!({ "name": "Grace B. Hopper" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["name"], "Grace B. Hopper");
    assert_eq!(body["email"], "grace@uni.edu");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_by_university_id(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students",
            Some(&token),
            Some(json!({
                "student_id": "S-1001",
                "name": "Grace Hopper",
                "email": "grace@uni.edu",
                "password": "studentpass123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "GET",
            "/api/students/S-1001",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["student_id"], "S-1001");
    assert_eq!(body["email"], "grace@uni.edu");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_empty_body_bad_request(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/students",
            Some(&token),
            Some(json!({
                "student_id": "S-1001",
                "name": "Grace Hopper",
                "email": "grace@uni.edu",
                "password": "studentpass123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/students/S-1001",
            Some(&token),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Nothing to update");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_missing_student_not_found(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "DELETE",
            "/api/students/S-4242",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
