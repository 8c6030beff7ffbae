use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::modules::courses::service::CourseService;
use crate::modules::enrollments::model::{EnrolledCourse, Enrollment};
use crate::modules::students::service::StudentService;
use crate::utils::errors::AppError;

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(db, cache))]
    pub async fn enroll(
        db: &PgPool,
        cache: Option<&RedisCache>,
        profile_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, AppError> {
        StudentService::get_student_by_id(db, profile_id).await?;
        CourseService::get_course_by_id(db, course_id).await?;

        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (profile_id, course_id)
            VALUES ($1, $2)
            RETURNING profile_id, course_id, created_at
            "#,
        )
        .bind(profile_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request("Student is already enrolled in this course");
                }
            }
            AppError::database(anyhow::Error::from(e).context("Failed to create enrollment"))
        })?;

        keys::invalidate::enrollment(cache, profile_id).await;

        Ok(enrollment)
    }

    #[instrument(skip(db, cache))]
    pub async fn unenroll(
        db: &PgPool,
        cache: Option<&RedisCache>,
        profile_id: Uuid,
        course_id: Uuid,
    ) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM enrollments WHERE profile_id = $1 AND course_id = $2")
                .bind(profile_id)
                .bind(course_id)
                .execute(db)
                .await
                .context("Failed to delete enrollment")
                .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Enrollment not found"));
        }

        keys::invalidate::enrollment(cache, profile_id).await;

        Ok(())
    }

    /// The courses a student is enrolled in, oldest enrollment first.
    #[instrument(skip(db, cache))]
    pub async fn courses_for_student(
        db: &PgPool,
        cache: Option<&RedisCache>,
        profile_id: Uuid,
    ) -> Result<Vec<EnrolledCourse>, AppError> {
        let key = keys::enrollments::by_student(profile_id);
        if let Some(cache) = cache {
            if let Some(cached) = cache.get::<Vec<EnrolledCourse>>(&key).await {
                return Ok(cached);
            }
        }

        let courses = sqlx::query_as::<_, EnrolledCourse>(
            r#"
            SELECT e.course_id, c.title, c.description, e.created_at AS enrolled_at
            FROM enrollments e
            JOIN courses c ON c.id = e.course_id
            WHERE e.profile_id = $1
            ORDER BY e.created_at
            "#,
        )
        .bind(profile_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch enrollments for student")
        .map_err(AppError::database)?;

        if let Some(cache) = cache {
            let _ = cache.set(&key, &courses).await;
        }

        Ok(courses)
    }

    /// Whether the student has an enrollment row for the course.
    #[instrument(skip(db))]
    pub async fn is_enrolled(
        db: &PgPool,
        profile_id: Uuid,
        course_id: Uuid,
    ) -> Result<bool, AppError> {
        let enrolled = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM enrollments WHERE profile_id = $1 AND course_id = $2)",
        )
        .bind(profile_id)
        .bind(course_id)
        .fetch_one(db)
        .await
        .context("Failed to check enrollment")
        .map_err(AppError::database)?;

        Ok(enrolled)
    }
}
