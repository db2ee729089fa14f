use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::utils::errors::AppError;
use crate::utils::listing::{ListParams, SortOrder};

use super::model::{CreateWeekDto, UpdateWeekDto, Week, WeekComment, WeekWithComments};

const SORT_COLUMNS: &[&str] = &["title", "start_date", "created_at"];
const WEEK_COLUMNS: &str = "id, title, start_date, description, links, created_at, updated_at";

pub struct WeekService;

impl WeekService {
    #[instrument(skip(db))]
    pub async fn get_weeks(db: &PgPool, params: ListParams) -> Result<Vec<Week>, AppError> {
        let sort = params.resolve_sort(SORT_COLUMNS, "start_date");
        let order = params.resolve_order(SortOrder::Asc);

        let mut query = format!("SELECT {} FROM weeks", WEEK_COLUMNS);
        if params.search_term().is_some() {
            query.push_str(" WHERE title ILIKE $1 OR description ILIKE $1");
        }
        query.push_str(&format!(" ORDER BY {} {}", sort, order.as_sql()));

        let mut sql = sqlx::query_as::<_, Week>(&query);
        if let Some(term) = params.search_term() {
            sql = sql.bind(format!("%{}%", term));
        }

        Ok(sql.fetch_all(db).await?)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_week(db: &PgPool, dto: CreateWeekDto) -> Result<Week, AppError> {
        let week = sqlx::query_as::<_, Week>(&format!(
            "INSERT INTO weeks (title, start_date, description, links)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            WEEK_COLUMNS
        ))
        .bind(&dto.title)
        .bind(dto.start_date)
        .bind(&dto.description)
        .bind(&dto.links)
        .fetch_one(db)
        .await?;

        metrics::track_content_created("week");

        Ok(week)
    }

    #[instrument(skip(db))]
    pub async fn get_week_by_id(db: &PgPool, id: Uuid) -> Result<WeekWithComments, AppError> {
        let week = sqlx::query_as::<_, Week>(&format!(
            "SELECT {} FROM weeks WHERE id = $1",
            WEEK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Week not found")))?;

        let comments = sqlx::query_as::<_, WeekComment>(
            "SELECT id, week_id, author, text, created_at
             FROM week_comments WHERE week_id = $1
             ORDER BY created_at ASC",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(WeekWithComments {
            id: week.id,
            title: week.title,
            start_date: week.start_date,
            description: week.description,
            links: week.links,
            created_at: week.created_at,
            updated_at: week.updated_at,
            comments,
        })
    }

    /// Partial update assembled only from the fields the caller supplied.
    #[instrument(skip(db, dto))]
    pub async fn update_week(db: &PgPool, id: Uuid, dto: UpdateWeekDto) -> Result<Week, AppError> {
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
        if dto.start_date.is_some() {
            sets.push(format!("start_date = ${}", idx));
            idx += 1;
        }
        if description.is_some() {
            sets.push(format!("description = ${}", idx));
            idx += 1;
        }
        if dto.links.is_some() {
            sets.push(format!("links = ${}", idx));
            idx += 1;
        }

        if sets.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("Nothing to update")));
        }

        let query = format!(
            "UPDATE weeks SET {}, updated_at = NOW() WHERE id = ${} RETURNING {}",
            sets.join(", "),
            idx,
            WEEK_COLUMNS
        );

        let mut sql = sqlx::query_as::<_, Week>(&query);
        if let Some(title) = title {
            sql = sql.bind(title.to_string());
        }
        if let Some(start_date) = dto.start_date {
            sql = sql.bind(start_date);
        }
        if let Some(description) = description {
            sql = sql.bind(description.to_string());
        }
        if let Some(links) = dto.links {
            sql = sql.bind(links);
        }

        sql.bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Week not found")))
    }

    /// Delete a week and its comment thread in one transaction.
    #[instrument(skip(db))]
    pub async fn delete_week(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM week_comments WHERE week_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM weeks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Week not found")));
        }

        tx.commit().await?;

        metrics::track_content_deleted("week");

        Ok(())
    }

    #[instrument(skip(db, text))]
    pub async fn add_comment(
        db: &PgPool,
        week_id: Uuid,
        author: &str,
        text: &str,
    ) -> Result<WeekComment, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM weeks WHERE id = $1)")
                .bind(week_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Week not found")));
        }

        let comment = sqlx::query_as::<_, WeekComment>(
            "INSERT INTO week_comments (week_id, author, text)
             VALUES ($1, $2, $3)
             RETURNING id, week_id, author, text, created_at",
        )
        .bind(week_id)
        .bind(author)
        .bind(text)
        .fetch_one(db)
        .await?;

        Ok(comment)
    }

    #[instrument(skip(db))]
    pub async fn get_comments(db: &PgPool, week_id: Uuid) -> Result<Vec<WeekComment>, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM weeks WHERE id = $1)")
                .bind(week_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Week not found")));
        }

        let comments = sqlx::query_as::<_, WeekComment>(
            "SELECT id, week_id, author, text, created_at
             FROM week_comments WHERE week_id = $1
             ORDER BY created_at ASC",
        )
        .bind(week_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    #[instrument(skip(db))]
    pub async fn delete_comment(db: &PgPool, comment_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM week_comments WHERE id = $1")
            .bind(comment_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Comment not found")));
        }

        Ok(())
    }
}
