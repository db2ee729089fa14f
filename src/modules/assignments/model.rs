use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    /// Attached file names or URLs, stored alongside the assignment
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AssignmentComment {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentWithComments {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<AssignmentComment>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub files: Vec<String>,
}

/// Partial update: absent or blank fields are left untouched. Supplying
/// `files` replaces the whole list, so an empty list clears it.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignmentDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}
