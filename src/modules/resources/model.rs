use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A course resource: a titled link with an optional description.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ResourceComment {
    pub id: Uuid,
    pub resource_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Resource detail view with its comment thread embedded.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceWithComments {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub link: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<ResourceComment>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResourceDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: String,
}

/// Partial update: absent or blank fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceDto {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "link must be a valid URL"))]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}
