use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Link between a student profile and a course.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Enrollment {
    pub profile_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EnrollStudentDto {
    pub course_id: Uuid,
}

/// A course joined with the enrollment that grants access to it; what
/// the student dashboard lists.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct EnrolledCourse {
    pub course_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}
