use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::metrics;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{Claims, LoginRequest, LoginResponse, RegisterRequestDto, User};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let existing_user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, is_admin, created_at FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        if existing_user.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password)
             VALUES ($1, $2, $3)
             RETURNING id, name, email, is_admin, created_at",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        metrics::track_user_registered();

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            name: String,
            email: String,
            password: String,
            is_admin: bool,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        // Same vague message for unknown email and wrong password so the
        // endpoint does not leak which accounts exist.
        let user_with_password = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, password, is_admin, created_at FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            metrics::track_login_failure("unknown_email");
            AppError::unauthorized(anyhow::anyhow!("Invalid email or password"))
        })?;

        let is_valid = verify_password(&dto.password, &user_with_password.password)?;

        if !is_valid {
            metrics::track_login_failure("wrong_password");
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        let access_token = create_access_token(
            user_with_password.id,
            &user_with_password.name,
            &user_with_password.email,
            user_with_password.is_admin,
            jwt_config,
        )?;

        metrics::track_login_success(user_with_password.is_admin);
        metrics::track_jwt_issued();

        Ok(LoginResponse {
            access_token,
            user: User {
                id: user_with_password.id,
                name: user_with_password.name,
                email: user_with_password.email,
                is_admin: user_with_password.is_admin,
                created_at: user_with_password.created_at,
            },
        })
    }

    /// Resolve the current account from verified token claims. 404s when the
    /// account behind a still-valid token has been deleted.
    #[instrument(skip(db, claims))]
    pub async fn current_user(db: &PgPool, claims: &Claims) -> Result<User, AppError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(anyhow::anyhow!("Invalid user ID in token")))?;

        sqlx::query_as::<_, User>(
            "SELECT id, name, email, is_admin, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn register_dto(email: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_user_success(pool: PgPool) {
        let user = AuthService::register_user(&pool, register_dto("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert!(!user.is_admin);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_user_duplicate_email(pool: PgPool) {
        AuthService::register_user(&pool, register_dto("ada@example.com"))
            .await
            .unwrap();

        let result = AuthService::register_user(&pool, register_dto("ada@example.com")).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.error.to_string(), "Email already exists");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_never_stores_plaintext_password(pool: PgPool) {
        let user = AuthService::register_user(&pool, register_dto("ada@example.com"))
            .await
            .unwrap();

        let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_ne!(stored, "password123");
        assert!(stored.starts_with("$2"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_user_success(pool: PgPool) {
        AuthService::register_user(&pool, register_dto("ada@example.com"))
            .await
            .unwrap();

        let response = AuthService::login_user(
            &pool,
            LoginRequest {
                email: "ada@example.com".to_string(),
                password: "password123".to_string(),
            },
            &test_jwt_config(),
        )
        .await
        .unwrap();

        assert!(!response.access_token.is_empty());
        assert_eq!(response.user.email, "ada@example.com");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_user_wrong_password(pool: PgPool) {
        AuthService::register_user(&pool, register_dto("ada@example.com"))
            .await
            .unwrap();

        let result = AuthService::login_user(
            &pool,
            LoginRequest {
                email: "ada@example.com".to_string(),
                password: "wrong-password".to_string(),
            },
            &test_jwt_config(),
        )
        .await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid email or password");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_login_user_unknown_email_same_message(pool: PgPool) {
        let result = AuthService::login_user(
            &pool,
            LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "password123".to_string(),
            },
            &test_jwt_config(),
        )
        .await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid email or password");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_current_user_found(pool: PgPool) {
        let user = AuthService::register_user(&pool, register_dto("ada@example.com"))
            .await
            .unwrap();

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: false,
            exp: 9999999999,
            iat: 0,
        };

        let current = AuthService::current_user(&pool, &claims).await.unwrap();
        assert_eq!(current.id, user.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_current_user_deleted_account(pool: PgPool) {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            name: "Ghost".to_string(),
            email: "ghost@example.com".to_string(),
            is_admin: false,
            exp: 9999999999,
            iat: 0,
        };

        let result = AuthService::current_user(&pool, &claims).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }
}
