use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A module within a course. `position` determines display order;
/// uniqueness of positions is not enforced.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateModuleDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateModuleDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(range(min = 1, message = "Position must be positive"))]
    pub position: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_module_dto_requires_title() {
        let dto = CreateModuleDto {
            title: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_module_dto_position_must_be_positive() {
        let dto = UpdateModuleDto {
            title: None,
            position: Some(0),
        };
        assert!(dto.validate().is_err());

        let dto = UpdateModuleDto {
            title: Some("Recap".to_string()),
            position: Some(3),
        };
        assert!(dto.validate().is_ok());
    }
}
