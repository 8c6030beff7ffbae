use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Courses to enroll the student in on creation. Enrollment failures
    /// are logged and do not fail the overall call.
    #[serde(default)]
    pub course_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_student_dto_password_boundary() {
        let base = CreateStudentDto {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "12345".to_string(),
            course_ids: vec![],
        };
        assert!(base.validate().is_err());

        let ok = CreateStudentDto {
            password: "123456".to_string(),
            ..base
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_create_student_dto_rejects_bad_email() {
        let dto = CreateStudentDto {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            password: "secret123".to_string(),
            course_ids: vec![],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_course_ids_default_to_empty() {
        let json = r#"{"name":"Ada","email":"ada@example.com","password":"secret123"}"#;
        let dto: CreateStudentDto = serde_json::from_str(json).unwrap();
        assert!(dto.course_ids.is_empty());
    }

    #[test]
    fn test_update_student_dto_partial() {
        let json = r#"{"name":"Grace"}"#;
        let dto: UpdateStudentDto = serde_json::from_str(json).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.name.as_deref(), Some("Grace"));
        assert!(dto.email.is_none());
        assert!(dto.password.is_none());
    }
}
