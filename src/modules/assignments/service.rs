use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::utils::errors::AppError;
use crate::utils::listing::{ListParams, SortOrder};

use super::model::{
    Assignment, AssignmentComment, AssignmentWithComments, CreateAssignmentDto,
    UpdateAssignmentDto,
};

const SORT_COLUMNS: &[&str] = &["title", "due_date", "created_at"];
const ASSIGNMENT_COLUMNS: &str = "id, title, description, due_date, files, created_at, updated_at";

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db))]
    pub async fn get_assignments(
        db: &PgPool,
        params: ListParams,
    ) -> Result<Vec<Assignment>, AppError> {
        let sort = params.resolve_sort(SORT_COLUMNS, "due_date");
        let order = params.resolve_order(SortOrder::Asc);

        let mut query = format!("SELECT {} FROM assignments", ASSIGNMENT_COLUMNS);
        if params.search_term().is_some() {
            query.push_str(" WHERE title ILIKE $1 OR description ILIKE $1");
        }
        query.push_str(&format!(" ORDER BY {} {}", sort, order.as_sql()));

        let mut sql = sqlx::query_as::<_, Assignment>(&query);
        if let Some(term) = params.search_term() {
            sql = sql.bind(format!("%{}%", term));
        }

        Ok(sql.fetch_all(db).await?)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_assignment(
        db: &PgPool,
        dto: CreateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "INSERT INTO assignments (title, description, due_date, files)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            ASSIGNMENT_COLUMNS
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.due_date)
        .bind(&dto.files)
        .fetch_one(db)
        .await?;

        metrics::track_content_created("assignment");

        Ok(assignment)
    }

    #[instrument(skip(db))]
    pub async fn get_assignment_by_id(
        db: &PgPool,
        id: Uuid,
    ) -> Result<AssignmentWithComments, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {} FROM assignments WHERE id = $1",
            ASSIGNMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))?;

        let comments = sqlx::query_as::<_, AssignmentComment>(
            "SELECT id, assignment_id, author, text, created_at
             FROM assignment_comments WHERE assignment_id = $1
             ORDER BY created_at ASC",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(AssignmentWithComments {
            id: assignment.id,
            title: assignment.title,
            description: assignment.description,
            due_date: assignment.due_date,
            files: assignment.files,
            created_at: assignment.created_at,
            updated_at: assignment.updated_at,
            comments,
        })
    }

    /// Partial update assembled only from the fields the caller supplied.
    /// Any change bumps `updated_at`.
    #[instrument(skip(db, dto))]
    pub async fn update_assignment(
        db: &PgPool,
        id: Uuid,
        dto: UpdateAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let title = dto.title.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let description = dto
            .description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        if title.is_some() {
            sets.push(format!("title = ${}", idx));
            idx += 1;
        }
        if description.is_some() {
            sets.push(format!("description = ${}", idx));
            idx += 1;
        }
        if dto.due_date.is_some() {
            sets.push(format!("due_date = ${}", idx));
            idx += 1;
        }
        if dto.files.is_some() {
            sets.push(format!("files = ${}", idx));
            idx += 1;
        }

        if sets.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("Nothing to update")));
        }

        let query = format!(
            "UPDATE assignments SET {}, updated_at = NOW() WHERE id = ${} RETURNING {}",
            sets.join(", "),
            idx,
            ASSIGNMENT_COLUMNS
        );

        let mut sql = sqlx::query_as::<_, Assignment>(&query);
        if let Some(title) = title {
            sql = sql.bind(title.to_string());
        }
        if let Some(description) = description {
            sql = sql.bind(description.to_string());
        }
        if let Some(due_date) = dto.due_date {
            sql = sql.bind(due_date);
        }
        if let Some(files) = dto.files {
            sql = sql.bind(files);
        }

        sql.bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))
    }

    /// Delete an assignment and its comment thread in one transaction.
    #[instrument(skip(db))]
    pub async fn delete_assignment(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM assignment_comments WHERE assignment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Assignment not found")));
        }

        tx.commit().await?;

        metrics::track_content_deleted("assignment");

        Ok(())
    }

    #[instrument(skip(db, text))]
    pub async fn add_comment(
        db: &PgPool,
        assignment_id: Uuid,
        author: &str,
        text: &str,
    ) -> Result<AssignmentComment, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM assignments WHERE id = $1)")
                .bind(assignment_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Assignment not found")));
        }

        let comment = sqlx::query_as::<_, AssignmentComment>(
            "INSERT INTO assignment_comments (assignment_id, author, text)
             VALUES ($1, $2, $3)
             RETURNING id, assignment_id, author, text, created_at",
        )
        .bind(assignment_id)
        .bind(author)
        .bind(text)
        .fetch_one(db)
        .await?;

        Ok(comment)
    }

    #[instrument(skip(db))]
    pub async fn get_comments(
        db: &PgPool,
        assignment_id: Uuid,
    ) -> Result<Vec<AssignmentComment>, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM assignments WHERE id = $1)")
                .bind(assignment_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Assignment not found")));
        }

        let comments = sqlx::query_as::<_, AssignmentComment>(
            "SELECT id, assignment_id, author, text, created_at
             FROM assignment_comments WHERE assignment_id = $1
             ORDER BY created_at ASC",
        )
        .bind(assignment_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    #[instrument(skip(db))]
    pub async fn delete_comment(db: &PgPool, comment_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assignment_comments WHERE id = $1")
            .bind(comment_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Comment not found")));
        }

        Ok(())
    }
}
