use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::utils::errors::AppError;

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, cache, dto))]
    pub async fn create_course(
        db: &PgPool,
        cache: Option<&RedisCache>,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (title, description)
            VALUES ($1, $2)
            RETURNING id, title, description, created_at
            "#,
        )
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .context("Failed to create course")
        .map_err(AppError::database)?;

        keys::invalidate::course(cache, Some(course.id)).await;

        Ok(course)
    }

    #[instrument(skip(db, cache))]
    pub async fn get_courses(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<Vec<Course>, AppError> {
        let key = keys::courses::list();
        if let Some(cache) = cache {
            if let Some(cached) = cache.get::<Vec<Course>>(&key).await {
                return Ok(cached);
            }
        }

        let courses = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, created_at
            FROM courses
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch courses")
        .map_err(AppError::database)?;

        if let Some(cache) = cache {
            let _ = cache.set(&key, &courses).await;
        }

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn get_course_by_id(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, title, description, created_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch course by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Course not found"))?;

        Ok(course)
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_course(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::get_course_by_id(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.or(existing.description);

        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET title = $1, description = $2
            WHERE id = $3
            RETURNING id, title, description, created_at
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update course")
        .map_err(AppError::database)?;

        keys::invalidate::course(cache, Some(id)).await;

        Ok(course)
    }

    #[instrument(skip(db, cache))]
    pub async fn delete_course(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete course")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Course not found"));
        }

        // The cascade also removed the course's modules, videos, and
        // enrollments.
        keys::invalidate::course_tree(cache).await;

        Ok(())
    }
}
