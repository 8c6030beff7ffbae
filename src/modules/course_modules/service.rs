use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::modules::course_modules::model::{CourseModule, CreateModuleDto, UpdateModuleDto};
use crate::modules::courses::service::CourseService;
use crate::utils::errors::AppError;

pub struct ModuleService;

impl ModuleService {
    /// Create a module at the end of the course.
    ///
    /// The position is computed inside the INSERT as max + 1 so two
    /// concurrent creations cannot both observe the same maximum.
    #[instrument(skip(db, cache, dto))]
    pub async fn create_module(
        db: &PgPool,
        cache: Option<&RedisCache>,
        course_id: Uuid,
        dto: CreateModuleDto,
    ) -> Result<CourseModule, AppError> {
        CourseService::get_course_by_id(db, course_id).await?;

        let module = sqlx::query_as::<_, CourseModule>(
            r#"
            INSERT INTO modules (course_id, title, position)
            VALUES (
                $1,
                $2,
                COALESCE((SELECT MAX(position) FROM modules WHERE course_id = $1), 0) + 1
            )
            RETURNING id, course_id, title, position, created_at
            "#,
        )
        .bind(course_id)
        .bind(&dto.title)
        .fetch_one(db)
        .await
        .context("Failed to create module")
        .map_err(AppError::database)?;

        keys::invalidate::module(cache, Some(module.id), Some(course_id)).await;

        Ok(module)
    }

    #[instrument(skip(db, cache))]
    pub async fn get_modules_by_course(
        db: &PgPool,
        cache: Option<&RedisCache>,
        course_id: Uuid,
    ) -> Result<Vec<CourseModule>, AppError> {
        let key = keys::course_modules::by_course(course_id);
        if let Some(cache) = cache {
            if let Some(cached) = cache.get::<Vec<CourseModule>>(&key).await {
                return Ok(cached);
            }
        }

        let modules = sqlx::query_as::<_, CourseModule>(
            r#"
            SELECT id, course_id, title, position, created_at
            FROM modules
            WHERE course_id = $1
            ORDER BY position, created_at
            "#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch modules for course")
        .map_err(AppError::database)?;

        if let Some(cache) = cache {
            let _ = cache.set(&key, &modules).await;
        }

        Ok(modules)
    }

    /// All modules across courses, for the admin module library.
    #[instrument(skip(db, cache))]
    pub async fn get_all_modules(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<Vec<CourseModule>, AppError> {
        let key = keys::course_modules::list();
        if let Some(cache) = cache {
            if let Some(cached) = cache.get::<Vec<CourseModule>>(&key).await {
                return Ok(cached);
            }
        }

        let modules = sqlx::query_as::<_, CourseModule>(
            r#"
            SELECT id, course_id, title, position, created_at
            FROM modules
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch modules")
        .map_err(AppError::database)?;

        if let Some(cache) = cache {
            let _ = cache.set(&key, &modules).await;
        }

        Ok(modules)
    }

    #[instrument(skip(db))]
    pub async fn get_module_by_id(db: &PgPool, id: Uuid) -> Result<CourseModule, AppError> {
        let module = sqlx::query_as::<_, CourseModule>(
            r#"
            SELECT id, course_id, title, position, created_at
            FROM modules
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch module by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Module not found"))?;

        Ok(module)
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_module(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
        dto: UpdateModuleDto,
    ) -> Result<CourseModule, AppError> {
        let existing = Self::get_module_by_id(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let position = dto.position.unwrap_or(existing.position);

        let module = sqlx::query_as::<_, CourseModule>(
            r#"
            UPDATE modules
            SET title = $1, position = $2
            WHERE id = $3
            RETURNING id, course_id, title, position, created_at
            "#,
        )
        .bind(&title)
        .bind(position)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update module")
        .map_err(AppError::database)?;

        keys::invalidate::module(cache, Some(id), Some(module.course_id)).await;

        Ok(module)
    }

    #[instrument(skip(db, cache))]
    pub async fn delete_module(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
    ) -> Result<(), AppError> {
        let existing = Self::get_module_by_id(db, id).await?;

        sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete module")
            .map_err(AppError::database)?;

        keys::invalidate::module(cache, Some(id), Some(existing.course_id)).await;
        keys::invalidate::video(cache, None, Some(id)).await;

        Ok(())
    }
}
