use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MessageResponse};
use crate::modules::course_modules::model::{CourseModule, CreateModuleDto, UpdateModuleDto};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::enrollments::model::{EnrollStudentDto, EnrolledCourse, Enrollment};
use crate::modules::profiles::model::{Profile, Role};
use crate::modules::students::import::{
    ImportPreview, ImportReport, ImportRowReport, ImportRowStatus, ParsedRow,
};
use crate::modules::students::model::{CreateStudentDto, UpdateStudentDto};
use crate::modules::videos::model::{CreateVideoDto, UpdateVideoDto, Video};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::course_modules::controller::create_module,
        crate::modules::course_modules::controller::get_course_modules,
        crate::modules::course_modules::controller::get_modules,
        crate::modules::course_modules::controller::get_module,
        crate::modules::course_modules::controller::update_module,
        crate::modules::course_modules::controller::delete_module,
        crate::modules::videos::controller::create_video,
        crate::modules::videos::controller::get_module_videos,
        crate::modules::videos::controller::get_videos,
        crate::modules::videos::controller::get_video,
        crate::modules::videos::controller::update_video,
        crate::modules::videos::controller::delete_video,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::preview_import,
        crate::modules::students::controller::import_students,
        crate::modules::enrollments::controller::enroll_student,
        crate::modules::enrollments::controller::get_student_enrollments,
        crate::modules::enrollments::controller::unenroll_student,
        crate::modules::dashboard::controller::my_courses,
        crate::modules::dashboard::controller::my_course,
        crate::modules::dashboard::controller::my_course_modules,
        crate::modules::dashboard::controller::my_module_videos,
    ),
    components(
        schemas(
            Role,
            Profile,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            CourseModule,
            CreateModuleDto,
            UpdateModuleDto,
            Video,
            CreateVideoDto,
            UpdateVideoDto,
            CreateStudentDto,
            UpdateStudentDto,
            Enrollment,
            EnrollStudentDto,
            EnrolledCourse,
            ParsedRow,
            ImportPreview,
            ImportRowStatus,
            ImportRowReport,
            ImportReport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign in, sign out, current profile"),
        (name = "Courses", description = "Course management"),
        (name = "Modules", description = "Course module management"),
        (name = "Videos", description = "Video management"),
        (name = "Students", description = "Student management and CSV bulk import"),
        (name = "Enrollments", description = "Student enrollment management"),
        (name = "Dashboard", description = "Student portal reads")
    ),
    info(
        title = "Lectern API",
        version = "0.1.0",
        description = "Course and student management API built with Rust, Axum, and PostgreSQL.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("lectern_session"))),
            );
        }
    }
}
