pub mod seeder;

use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Create (or keep) an admin portal account. Used by the `create-admin`
/// command so a fresh deployment has a way into the admin area.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let result = sqlx::query(
        "INSERT INTO users (name, email, password, is_admin)
         VALUES ($1, $2, $3, TRUE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(name)
    .bind(email)
    .bind(hashed_password)
    .execute(db)
    .await?;

    if result.rows_affected() == 0 {
        return Err("User with this email already exists".into());
    }

    Ok(())
}
