use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One week of the course breakdown.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Week {
    pub id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub description: String,
    /// Related links for the week's material
    pub links: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct WeekComment {
    pub id: Uuid,
    pub week_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeekWithComments {
    pub id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub description: String,
    pub links: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<WeekComment>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWeekDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Partial update: absent or blank fields are left untouched. Supplying
/// `links` replaces the whole list.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateWeekDto {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub links: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
}
