use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics;
use crate::utils::errors::AppError;
use crate::utils::listing::{ListParams, SortOrder};

use super::model::{CreateTopicDto, Reply, Topic, TopicWithReplies, UpdateTopicDto};

const SORT_COLUMNS: &[&str] = &["subject", "author", "created_at"];

pub struct DiscussionService;

impl DiscussionService {
    #[instrument(skip(db))]
    pub async fn get_topics(db: &PgPool, params: ListParams) -> Result<Vec<Topic>, AppError> {
        let sort = params.resolve_sort(SORT_COLUMNS, "created_at");
        let order = params.resolve_order(SortOrder::Desc);

        let mut query =
            String::from("SELECT id, subject, message, author, created_at FROM topics");
        if params.search_term().is_some() {
            query.push_str(" WHERE subject ILIKE $1 OR message ILIKE $1 OR author ILIKE $1");
        }
        query.push_str(&format!(" ORDER BY {} {}", sort, order.as_sql()));

        let mut sql = sqlx::query_as::<_, Topic>(&query);
        if let Some(term) = params.search_term() {
            sql = sql.bind(format!("%{}%", term));
        }

        Ok(sql.fetch_all(db).await?)
    }

    #[instrument(skip(db, dto))]
    pub async fn create_topic(
        db: &PgPool,
        author: &str,
        dto: CreateTopicDto,
    ) -> Result<Topic, AppError> {
        let topic = sqlx::query_as::<_, Topic>(
            "INSERT INTO topics (subject, message, author)
             VALUES ($1, $2, $3)
             RETURNING id, subject, message, author, created_at",
        )
        .bind(&dto.subject)
        .bind(&dto.message)
        .bind(author)
        .fetch_one(db)
        .await?;

        metrics::track_content_created("topic");

        Ok(topic)
    }

    #[instrument(skip(db))]
    pub async fn get_topic_by_id(db: &PgPool, id: Uuid) -> Result<TopicWithReplies, AppError> {
        let topic = sqlx::query_as::<_, Topic>(
            "SELECT id, subject, message, author, created_at FROM topics WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Topic not found")))?;

        let replies = sqlx::query_as::<_, Reply>(
            "SELECT id, topic_id, text, author, created_at
             FROM replies WHERE topic_id = $1
             ORDER BY created_at ASC",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(TopicWithReplies {
            id: topic.id,
            subject: topic.subject,
            message: topic.message,
            author: topic.author,
            created_at: topic.created_at,
            replies,
        })
    }

    /// Partial update assembled only from the fields the caller supplied.
    #[instrument(skip(db, dto))]
    pub async fn update_topic(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTopicDto,
    ) -> Result<Topic, AppError> {
        let subject = dto
            .subject
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let message = dto
            .message
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        if subject.is_some() {
            sets.push(format!("subject = ${}", idx));
            idx += 1;
        }
        if message.is_some() {
            sets.push(format!("message = ${}", idx));
            idx += 1;
        }

        if sets.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!("Nothing to update")));
        }

        let query = format!(
            "UPDATE topics SET {} WHERE id = ${} RETURNING id, subject, message, author, created_at",
            sets.join(", "),
            idx
        );

        let mut sql = sqlx::query_as::<_, Topic>(&query);
        if let Some(subject) = subject {
            sql = sql.bind(subject.to_string());
        }
        if let Some(message) = message {
            sql = sql.bind(message.to_string());
        }

        sql.bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Topic not found")))
    }

    /// Delete a topic and its reply thread in one transaction.
    #[instrument(skip(db))]
    pub async fn delete_topic(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM replies WHERE topic_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Topic not found")));
        }

        tx.commit().await?;

        metrics::track_content_deleted("topic");

        Ok(())
    }

    #[instrument(skip(db, text))]
    pub async fn add_reply(
        db: &PgPool,
        topic_id: Uuid,
        author: &str,
        text: &str,
    ) -> Result<Reply, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM topics WHERE id = $1)")
                .bind(topic_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Topic not found")));
        }

        let reply = sqlx::query_as::<_, Reply>(
            "INSERT INTO replies (topic_id, text, author)
             VALUES ($1, $2, $3)
             RETURNING id, topic_id, text, author, created_at",
        )
        .bind(topic_id)
        .bind(text)
        .bind(author)
        .fetch_one(db)
        .await?;

        metrics::track_content_created("reply");

        Ok(reply)
    }

    #[instrument(skip(db))]
    pub async fn get_replies(db: &PgPool, topic_id: Uuid) -> Result<Vec<Reply>, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM topics WHERE id = $1)")
                .bind(topic_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Topic not found")));
        }

        let replies = sqlx::query_as::<_, Reply>(
            "SELECT id, topic_id, text, author, created_at
             FROM replies WHERE topic_id = $1
             ORDER BY created_at ASC",
        )
        .bind(topic_id)
        .fetch_all(db)
        .await?;

        Ok(replies)
    }

    #[instrument(skip(db))]
    pub async fn delete_reply(db: &PgPool, reply_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM replies WHERE id = $1")
            .bind(reply_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Reply not found")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn topic_dto(subject: &str) -> CreateTopicDto {
        CreateTopicDto {
            subject: subject.to_string(),
            message: "Anyone stuck on problem 3?".to_string(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_create_topic_records_author(pool: PgPool) {
        let topic = DiscussionService::create_topic(&pool, "Ada", topic_dto("Problem set 2"))
            .await
            .unwrap();

        assert_eq!(topic.subject, "Problem set 2");
        assert_eq!(topic.author, "Ada");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_get_topics_newest_first(pool: PgPool) {
        DiscussionService::create_topic(&pool, "Ada", topic_dto("First"))
            .await
            .unwrap();
        DiscussionService::create_topic(&pool, "Alan", topic_dto("Second"))
            .await
            .unwrap();

        let topics = DiscussionService::get_topics(&pool, ListParams::default())
            .await
            .unwrap();

        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].subject, "Second");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_get_topics_search_by_author(pool: PgPool) {
        DiscussionService::create_topic(&pool, "Ada", topic_dto("First"))
            .await
            .unwrap();
        DiscussionService::create_topic(&pool, "Alan", topic_dto("Second"))
            .await
            .unwrap();

        let topics = DiscussionService::get_topics(
            &pool,
            ListParams {
                search: Some("alan".to_string()),
                sort: None,
                order: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].author, "Alan");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_topic_with_replies(pool: PgPool) {
        let topic = DiscussionService::create_topic(&pool, "Ada", topic_dto("Problem set 2"))
            .await
            .unwrap();
        DiscussionService::add_reply(&pool, topic.id, "Alan", "Try induction")
            .await
            .unwrap();

        let detail = DiscussionService::get_topic_by_id(&pool, topic.id)
            .await
            .unwrap();

        assert_eq!(detail.replies.len(), 1);
        assert_eq!(detail.replies[0].author, "Alan");
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_topic_partial(pool: PgPool) {
        let topic = DiscussionService::create_topic(&pool, "Ada", topic_dto("Problem set 2"))
            .await
            .unwrap();

        let updated = DiscussionService::update_topic(
            &pool,
            topic.id,
            UpdateTopicDto {
                subject: Some("Problem set 2 (revised)".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.subject, "Problem set 2 (revised)");
        assert_eq!(updated.message, topic.message);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_topic_cascades_replies(pool: PgPool) {
        let topic = DiscussionService::create_topic(&pool, "Ada", topic_dto("Problem set 2"))
            .await
            .unwrap();
        DiscussionService::add_reply(&pool, topic.id, "Alan", "Try induction")
            .await
            .unwrap();

        DiscussionService::delete_topic(&pool, topic.id)
            .await
            .unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM replies")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_reply_to_missing_topic(pool: PgPool) {
        let result =
            DiscussionService::add_reply(&pool, Uuid::new_v4(), "Ada", "Hello").await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_reply_not_found(pool: PgPool) {
        let result = DiscussionService::delete_reply(&pool, Uuid::new_v4()).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().status, StatusCode::NOT_FOUND);
    }
}
