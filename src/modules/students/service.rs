use sqlx::PgPool;
use tracing::instrument;

use crate::utils::errors::AppError;
use crate::utils::listing::{ListParams, SortOrder};
use crate::utils::password::{hash_password, verify_password};

use super::model::{ChangePasswordDto, CreateStudentDto, Student, UpdateStudentDto};

const SORT_COLUMNS: &[&str] = &["name", "student_id", "email"];
const STUDENT_COLUMNS: &str = "id, student_id, name, email, created_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool, params: ListParams) -> Result<Vec<Student>, AppError> {
        let sort = params.resolve_sort(SORT_COLUMNS, "name");
        let order = params.resolve_order(SortOrder::Asc);

        let mut query = format!("SELECT {} FROM students", STUDENT_COLUMNS);
        if params.search_term().is_some() {
            query.push_str(" WHERE name ILIKE $1 OR student_id ILIKE $1 OR email ILIKE $1");
        }
        query.push_str(&format!(" ORDER BY {} {}", sort, order.as_sql()));

        let mut sql = sqlx::query_as::<_, Student>(&query);
        if let Some(term) = params.search_term() {
            sql = sql.bind(format!("%{}%", term));
        }

        Ok(sql.fetch_all(db).await?)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let student_id_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)")
                .bind(&dto.student_id)
                .fetch_one(db)
                .await?;

        if student_id_taken {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Student ID already exists"
            )));
        }

        let email_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE email = $1)")
                .bind(&dto.email)
                .fetch_one(db)
                .await?;

        if email_taken {
            return Err(AppError::conflict(anyhow::anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (student_id, name, email, password)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            STUDENT_COLUMNS
        ))
        .bind(&dto.student_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            // Backstop for concurrent inserts racing past the pre-checks
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!(
                    "Student ID or email already exists"
                ));
            }
            AppError::from(e)
        })?;

        Ok(student)
    }

    /// Single-record lookups are keyed by the university student ID, not the
    /// row UUID. That is the identifier the admin area works with.
    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, student_id: &str) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE student_id = $1",
            STUDENT_COLUMNS
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    /// Partial update assembled only from the fields the caller supplied.
    /// Blank strings count as absent, matching the create-form semantics.
    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        student_id: &str,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let new_student_id = dto
            .student_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let name = dto.name.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let email = dto.email.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        if new_student_id.is_some() {
            sets.push(format!("student_id = ${}", idx));
            idx += 1;
        }
        if name.is_some() {
            sets.push(format!("name = ${}", idx));
            idx += 1;
        }
        if email.is_some() {
            sets.push(format!("email = ${}", idx));
            idx += 1;
        }

        if sets.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("Nothing to update")));
        }

        let query = format!(
            "UPDATE students SET {} WHERE student_id = ${} RETURNING {}",
            sets.join(", "),
            idx,
            STUDENT_COLUMNS
        );

        let mut sql = sqlx::query_as::<_, Student>(&query);
        if let Some(new_student_id) = new_student_id {
            sql = sql.bind(new_student_id.to_string());
        }
        if let Some(name) = name {
            sql = sql.bind(name.to_string());
        }
        if let Some(email) = email {
            sql = sql.bind(email.to_string());
        }

        sql.bind(student_id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::conflict(anyhow::anyhow!(
                        "Student ID or email already exists"
                    ));
                }
                AppError::from(e)
            })?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, student_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        student_id: &str,
        dto: ChangePasswordDto,
    ) -> Result<(), AppError> {
        let stored: String =
            sqlx::query_scalar("SELECT password FROM students WHERE student_id = $1")
                .bind(student_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        if !verify_password(&dto.current_password, &stored)? {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let hashed = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE students SET password = $1 WHERE student_id = $2")
            .bind(&hashed)
            .bind(student_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
