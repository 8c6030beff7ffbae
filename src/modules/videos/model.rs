use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A video within a module. `bunny_video_id` is an opaque reference to
/// the externally hosted stream; historically it holds either a bare ID
/// or a full embed URL, so it is never parsed.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Video {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub bunny_video_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateVideoDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Video reference is required"))]
    pub bunny_video_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateVideoDto {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Video reference is required"))]
    pub bunny_video_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_video_dto_requires_both_fields() {
        let dto = CreateVideoDto {
            title: "Welcome".to_string(),
            bunny_video_id: String::new(),
        };
        assert!(dto.validate().is_err());

        let dto = CreateVideoDto {
            title: "Welcome".to_string(),
            bunny_video_id: "https://iframe.mediadelivery.net/embed/1/abc".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_video_reference_stays_opaque() {
        // Bare IDs and full URLs are both acceptable; nothing parses them.
        for reference in ["abc-123", "https://iframe.mediadelivery.net/embed/1/abc"] {
            let dto = CreateVideoDto {
                title: "Clip".to_string(),
                bunny_video_id: reference.to_string(),
            };
            assert!(dto.validate().is_ok());
        }
    }
}
