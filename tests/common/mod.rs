use axum::body::Body;
use axum::http::Request;
use courseboard::config::cors::CorsConfig;
use courseboard::config::jwt::JwtConfig;
use courseboard::config::rate_limit::RateLimitConfig;
use courseboard::router::init_router;
use courseboard::state::AppState;
use courseboard::utils::password::hash_password;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        rate_limit_config: RateLimitConfig::from_env(),
    };
    init_router(state)
}

/// Insert a portal account directly, bypassing the register endpoint.
#[allow(dead_code)]
pub async fn create_test_user(pool: &PgPool, name: &str, password: &str, is_admin: bool) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password, is_admin)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(name)
    .bind(&email)
    .bind(&hashed)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        name: name.to_string(),
        email,
        password: password.to_string(),
    }
}

#[allow(dead_code)]
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("user-{}@example.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn create_test_resource(pool: &PgPool, title: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO resources (title, description, link)
         VALUES ($1, 'Test resource', 'https://example.com/resource')
         RETURNING id",
    )
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_topic(pool: &PgPool, subject: &str, author: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO topics (subject, message, author)
         VALUES ($1, 'Test message', $2)
         RETURNING id",
    )
    .bind(subject)
    .bind(author)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Build a JSON request with an optional bearer token.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let body = match body {
        Some(value) => Body::from(serde_json::to_string(&value).unwrap()),
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
