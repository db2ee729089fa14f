use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::utils::errors::AppError;
use crate::utils::listing::{ListParams, SortOrder};

use super::model::{
    CreateResourceDto, Resource, ResourceComment, ResourceWithComments, UpdateResourceDto,
};

const SORT_COLUMNS: &[&str] = &["title", "created_at"];

pub struct ResourceService;

impl ResourceService {
    #[instrument(skip(db))]
    pub async fn get_resources(db: &PgPool, params: ListParams) -> Result<Vec<Resource>, AppError> {
        let sort = params.resolve_sort(SORT_COLUMNS, "created_at");
        let order = params.resolve_order(SortOrder::Desc);

        let mut query =
            String::from("SELECT id, title, description, link, created_at FROM resources");
        if params.search_term().is_some() {
            query.push_str(" WHERE title ILIKE $1 OR description ILIKE $1");
        }
        query.push_str(&format!(" ORDER BY {} {}", sort, order.as_sql()));

        let mut sql = sqlx::query_as::<_, Resource>(&query);
        if let Some(term) = params.search_term() {
            sql = sql.bind(format!("%{}%", term));
        }

        Ok(sql.fetch_all(db).await?)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_resource(db: &PgPool, dto: CreateResourceDto) -> Result<Resource, AppError> {
        let resource = sqlx::query_as::<_, Resource>(
            "INSERT INTO resources (title, description, link)
             VALUES ($1, $2, $3)
             RETURNING id, title, description, link, created_at",
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.link)
        .fetch_one(db)
        .await?;

        metrics::track_content_created("resource");

        Ok(resource)
    }

    #[instrument(skip(db))]
    pub async fn get_resource_by_id(db: &PgPool, id: Uuid) -> Result<ResourceWithComments, AppError> {
        let resource = sqlx::query_as::<_, Resource>(
            "SELECT id, title, description, link, created_at FROM resources WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Resource not found")))?;

        let comments = sqlx::query_as::<_, ResourceComment>(
            "SELECT id, resource_id, author, text, created_at
             FROM resource_comments WHERE resource_id = $1
             ORDER BY created_at ASC",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(ResourceWithComments {
            id: resource.id,
            title: resource.title,
            description: resource.description,
            link: resource.link,
            created_at: resource.created_at,
            comments,
        })
    }

    /// Partial update assembled only from the fields the caller supplied.
    #[instrument(skip(db, dto))]
    pub async fn update_resource(
        db: &PgPool,
        id: Uuid,
        dto: UpdateResourceDto,
    ) -> Result<Resource, AppError> {
        let title = dto.title.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let description = dto
            .description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        // The link already passed URL validation, so it is stored exactly as
        // sent rather than trimmed like the free-text fields.
        let link = dto.link.as_deref().filter(|s| !s.is_empty());

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
        if link.is_some() {
            sets.push(format!("link = ${}", idx));
            idx += 1;
        }

        if sets.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("Nothing to update")));
        }

        let query = format!(
            "UPDATE resources SET {} WHERE id = ${} RETURNING id, title, description, link, created_at",
            sets.join(", "),
            idx
        );

        let mut sql = sqlx::query_as::<_, Resource>(&query);
        if let Some(title) = title {
            sql = sql.bind(title.to_string());
        }
        if let Some(description) = description {
            sql = sql.bind(description.to_string());
        }
        if let Some(link) = link {
            sql = sql.bind(link.to_string());
        }

        sql.bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Resource not found")))
    }

    /// Delete a resource and its comment thread in one transaction. The
    /// comments go first so a failure between the two statements can never
    /// leave orphaned comments behind.
    #[instrument(skip(db))]
    pub async fn delete_resource(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM resource_comments WHERE resource_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the comment delete
            return Err(AppError::not_found(anyhow::anyhow!("Resource not found")));
        }

        tx.commit().await?;

        metrics::track_content_deleted("resource");

        Ok(())
    }

    #[instrument(skip(db, text))]
    pub async fn add_comment(
        db: &PgPool,
        resource_id: Uuid,
        author: &str,
        text: &str,
    ) -> Result<ResourceComment, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM resources WHERE id = $1)")
                .bind(resource_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Resource not found")));
        }

        let comment = sqlx::query_as::<_, ResourceComment>(
            "INSERT INTO resource_comments (resource_id, author, text)
             VALUES ($1, $2, $3)
             RETURNING id, resource_id, author, text, created_at",
        )
        .bind(resource_id)
        .bind(author)
        .bind(text)
        .fetch_one(db)
        .await?;

        Ok(comment)
    }

    #[instrument(skip(db))]
    pub async fn get_comments(
        db: &PgPool,
        resource_id: Uuid,
    ) -> Result<Vec<ResourceComment>, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM resources WHERE id = $1)")
                .bind(resource_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Resource not found")));
        }

        let comments = sqlx::query_as::<_, ResourceComment>(
            "SELECT id, resource_id, author, text, created_at
             FROM resource_comments WHERE resource_id = $1
             ORDER BY created_at ASC",
        )
        .bind(resource_id)
        .fetch_all(db)
        .await?;

        Ok(comments)
    }

    #[instrument(skip(db))]
    pub async fn delete_comment(db: &PgPool, comment_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM resource_comments WHERE id = $1")
            .bind(comment_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Comment not found")));
        }

        Ok(())
    }
}
