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
async fn test_assignment_lifecycle(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/assignments",
            Some(&token),
            Some(json!({
                "title": "Essay 1",
                "description": "Submit via the portal",
                "due_date": "2026-10-01",
                "files": ["brief.pdf"]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["due_date"], "2026-10-01");

    // Anonymous read
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/assignments/{}", id),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Partial update moves the deadline only
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/assignments/{}", id),
            Some(&token),
            Some(json!({ "due_date": "2026-10-15" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = response_json(response).await;
    assert_eq!(updated["due_date"], "2026-10-15");
    assert_eq!(updated["title"], "Essay 1");

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/assignments/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_assignment_missing_due_date(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/assignments",
            Some(&token),
            Some(json!({
                "title": "Essay 1",
                "description": "Submit via the portal"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "due_date is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_assignment_missing_description(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/assignments",
            Some(&token),
            Some(json!({
                "title": "Essay 1",
                "due_date": "2026-10-01"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "description is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_assignment_blank_description(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/assignments",
            Some(&token),
            Some(json!({
                "title": "Essay 1",
                "description": "",
                "due_date": "2026-10-01"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_assignment_empty_body(pool: PgPool) {
    let token = admin_token(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/assignments",
            Some(&token),
            Some(json!({
                "title": "Essay 1",
                "description": "Submit via the portal",
                "due_date": "2026-10-01"
            })),
        ))
        .await
        .unwrap();
    let created = response_json(response).await;
    let id = created["id"].as_str().unwrap();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/assignments/{}", id),
            Some(&token),
            Some(json!({})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Nothing to update");
}
