//! Read-side services for the student portal.
//!
//! Students only see content of courses they are enrolled in; admins
//! pass every check. This is the explicit form of the row-level access
//! policy the page gate cannot express.

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::RedisCache;
use crate::modules::course_modules::model::CourseModule;
use crate::modules::course_modules::service::ModuleService;
use crate::modules::courses::model::Course;
use crate::modules::courses::service::CourseService;
use crate::modules::enrollments::model::EnrolledCourse;
use crate::modules::enrollments::service::EnrollmentService;
use crate::modules::profiles::model::Role;
use crate::modules::videos::model::Video;
use crate::modules::videos::service::VideoService;
use crate::utils::errors::AppError;

pub struct DashboardService;

impl DashboardService {
    async fn ensure_enrolled(
        db: &PgPool,
        profile_id: Uuid,
        role: Role,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        match role {
            Role::Admin => Ok(()),
            Role::Student => {
                if EnrollmentService::is_enrolled(db, profile_id, course_id).await? {
                    Ok(())
                } else {
                    Err(AppError::forbidden("You are not enrolled in this course"))
                }
            }
        }
    }

    #[instrument(skip(db, cache))]
    pub async fn enrolled_courses(
        db: &PgPool,
        cache: Option<&RedisCache>,
        profile_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, AppError> {
        EnrollmentService::courses_for_student(db, cache, profile_id).await
    }

    #[instrument(skip(db))]
    pub async fn course(
        db: &PgPool,
        profile_id: Uuid,
        role: Role,
        course_id: Uuid,
    ) -> Result<Course, AppError> {
        Self::ensure_enrolled(db, profile_id, role, course_id).await?;
        CourseService::get_course_by_id(db, course_id).await
    }

    #[instrument(skip(db, cache))]
    pub async fn course_modules(
        db: &PgPool,
        cache: Option<&RedisCache>,
        profile_id: Uuid,
        role: Role,
        course_id: Uuid,
    ) -> Result<Vec<CourseModule>, AppError> {
        Self::ensure_enrolled(db, profile_id, role, course_id).await?;
        ModuleService::get_modules_by_course(db, cache, course_id).await
    }

    #[instrument(skip(db, cache))]
    pub async fn module_videos(
        db: &PgPool,
        cache: Option<&RedisCache>,
        profile_id: Uuid,
        role: Role,
        module_id: Uuid,
    ) -> Result<Vec<Video>, AppError> {
        let module = ModuleService::get_module_by_id(db, module_id).await?;
        Self::ensure_enrolled(db, profile_id, role, module.course_id).await?;
        VideoService::get_videos_by_module(db, cache, module_id).await
    }
}
