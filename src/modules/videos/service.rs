use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::modules::course_modules::service::ModuleService;
use crate::modules::videos::model::{CreateVideoDto, UpdateVideoDto, Video};
use crate::utils::errors::AppError;

pub struct VideoService;

impl VideoService {
    #[instrument(skip(db, cache, dto))]
    pub async fn create_video(
        db: &PgPool,
        cache: Option<&RedisCache>,
        module_id: Uuid,
        dto: CreateVideoDto,
    ) -> Result<Video, AppError> {
        ModuleService::get_module_by_id(db, module_id).await?;

        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (module_id, title, bunny_video_id)
            VALUES ($1, $2, $3)
            RETURNING id, module_id, title, bunny_video_id, created_at
            "#,
        )
        .bind(module_id)
        .bind(&dto.title)
        .bind(&dto.bunny_video_id)
        .fetch_one(db)
        .await
        .context("Failed to create video")
        .map_err(AppError::database)?;

        keys::invalidate::video(cache, Some(video.id), Some(module_id)).await;

        Ok(video)
    }

    #[instrument(skip(db, cache))]
    pub async fn get_videos_by_module(
        db: &PgPool,
        cache: Option<&RedisCache>,
        module_id: Uuid,
    ) -> Result<Vec<Video>, AppError> {
        let key = keys::videos::by_module(module_id);
        if let Some(cache) = cache {
            if let Some(cached) = cache.get::<Vec<Video>>(&key).await {
                return Ok(cached);
            }
        }

        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, module_id, title, bunny_video_id, created_at
            FROM videos
            WHERE module_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(module_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch videos for module")
        .map_err(AppError::database)?;

        if let Some(cache) = cache {
            let _ = cache.set(&key, &videos).await;
        }

        Ok(videos)
    }

    /// All videos across modules, for the admin video library.
    #[instrument(skip(db, cache))]
    pub async fn get_all_videos(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<Vec<Video>, AppError> {
        let key = keys::videos::list();
        if let Some(cache) = cache {
            if let Some(cached) = cache.get::<Vec<Video>>(&key).await {
                return Ok(cached);
            }
        }

        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, module_id, title, bunny_video_id, created_at
            FROM videos
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch videos")
        .map_err(AppError::database)?;

        if let Some(cache) = cache {
            let _ = cache.set(&key, &videos).await;
        }

        Ok(videos)
    }

    #[instrument(skip(db))]
    pub async fn get_video_by_id(db: &PgPool, id: Uuid) -> Result<Video, AppError> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, module_id, title, bunny_video_id, created_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch video by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Video not found"))?;

        Ok(video)
    }

    #[instrument(skip(db, cache, dto))]
    pub async fn update_video(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
        dto: UpdateVideoDto,
    ) -> Result<Video, AppError> {
        let existing = Self::get_video_by_id(db, id).await?;

        let title = dto.title.unwrap_or(existing.title);
        let bunny_video_id = dto.bunny_video_id.unwrap_or(existing.bunny_video_id);

        let video = sqlx::query_as::<_, Video>(
            r#"
            UPDATE videos
            SET title = $1, bunny_video_id = $2
            WHERE id = $3
            RETURNING id, module_id, title, bunny_video_id, created_at
            "#,
        )
        .bind(&title)
        .bind(&bunny_video_id)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update video")
        .map_err(AppError::database)?;

        keys::invalidate::video(cache, Some(id), Some(video.module_id)).await;

        Ok(video)
    }

    #[instrument(skip(db, cache))]
    pub async fn delete_video(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
    ) -> Result<(), AppError> {
        let existing = Self::get_video_by_id(db, id).await?;

        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete video")
            .map_err(AppError::database)?;

        keys::invalidate::video(cache, Some(id), Some(existing.module_id)).await;

        Ok(())
    }
}
