use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A course as stored in the database.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_course_dto_rejects_empty_title() {
        let dto = CreateCourseDto {
            title: "".to_string(),
            description: None,
        };
        assert!(dto.validate().is_err());

        let dto = CreateCourseDto {
            title: "Rust 101".to_string(),
            description: Some("Intro course".to_string()),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_course_dto_all_optional() {
        let dto: UpdateCourseDto = serde_json::from_str("{}").unwrap();
        assert!(dto.title.is_none());
        assert!(dto.description.is_none());
        assert!(dto.validate().is_ok());
    }
}
