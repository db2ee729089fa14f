use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Topic {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Reply {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Topic detail view with its reply thread embedded.
#[derive(Debug, Serialize, ToSchema)]
pub struct TopicWithReplies {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTopicDto {
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

/// Partial update: absent or blank fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTopicDto {
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReplyDto {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}
