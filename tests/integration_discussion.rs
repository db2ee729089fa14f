mod common;

use axum::http::StatusCode;
use common::{
    create_test_topic, create_test_user, get_auth_token, json_request, response_json,
    setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_topics_are_public_to_read(pool: PgPool) {
    create_test_topic(&pool, "Problem set 2", "Ada").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request("GET", "/api/discussion/topics", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_topic_attributes_author(pool: PgPool) {
    let user = create_test_user(&pool, "Ada Lovelace", "password123", false).await;
    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &user.email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/discussion/topics",
            Some(&token),
            Some(json!({
                "subject": "Problem set 2",
                "message": "Anyone stuck on problem 3?"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["author"], "Ada Lovelace");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_topic_requires_auth(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/discussion/topics",
            None,
            Some(json!({
                "subject": "Problem set 2",
                "message": "Anyone stuck on problem 3?"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reply_and_read_thread(pool: PgPool) {
    let topic_id = create_test_topic(&pool, "Problem set 2", "Ada").await;

    let user = create_test_user(&pool, "Alan Turing", "password123", false).await;
    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &user.email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/discussion/topics/{}/replies", topic_id),
            Some(&token),
            Some(json!({ "text": "Try induction" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/discussion/topics/{}", topic_id),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["replies"].as_array().unwrap().len(), 1);
    assert_eq!(body["replies"][0]["author"], "Alan Turing");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_topic_admin_only(pool: PgPool) {
    let topic_id = create_test_topic(&pool, "Problem set 2", "Ada").await;

    let user = create_test_user(&pool, "Alan Turing", "password123", false).await;
    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &user.email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/discussion/topics/{}", topic_id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = create_test_user(&pool, "Course Admin", "adminpass123", true).await;
    let app = setup_test_app(pool.clone()).await;
    let admin_token = get_auth_token(app, &admin.email, "adminpass123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/discussion/topics/{}", topic_id),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reply_to_missing_topic_not_found(pool: PgPool) {
    let user = create_test_user(&pool, "Alan Turing", "password123", false).await;
    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &user.email, "password123").await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/discussion/topics/{}/replies", uuid::Uuid::new_v4()),
            Some(&token),
            Some(json!({ "text": "Hello" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
