use anyhow::Context;
use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::cache::{RedisCache, keys};
use crate::modules::profiles::model::Profile;
use crate::modules::students::model::{CreateStudentDto, UpdateStudentDto};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

pub struct StudentService;

impl StudentService {
    /// Create a student account.
    ///
    /// Three sequential steps, not wrapped in a transaction: (a) insert
    /// the identity, (b) insert the profile, (c) insert one enrollment
    /// per supplied course. If (a) fails nothing happened. If (b) fails
    /// the identity is deleted again so no orphaned login remains.
    /// Failures in (c) are logged and do not fail the call.
    #[instrument(skip(db, cache, dto))]
    pub async fn create_student(
        db: &PgPool,
        cache: Option<&RedisCache>,
        dto: CreateStudentDto,
    ) -> Result<Profile, AppError> {
        if dto.password.len() < 6 {
            return Err(AppError::unprocessable(
                "Password must be at least 6 characters",
            ));
        }

        let email = dto.email.trim().to_lowercase();
        let hashed_password = hash_password(&dto.password)?;

        let identity_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO identities (email, password)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::bad_request(format!(
                        "A student with email {} already exists",
                        email
                    ));
                }
            }
            AppError::database(anyhow::Error::from(e).context("Failed to create identity"))
        })?;

        let profile = match sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, name, email, role)
            VALUES ($1, $2, $3, 'student')
            RETURNING id, name, email, role, created_at
            "#,
        )
        .bind(identity_id)
        .bind(dto.name.trim())
        .bind(&email)
        .fetch_one(db)
        .await
        {
            Ok(profile) => profile,
            Err(e) => {
                // Compensate: drop the identity created in step (a) so a
                // failed profile insert does not leave an orphaned login.
                if let Err(cleanup_err) = sqlx::query("DELETE FROM identities WHERE id = $1")
                    .bind(identity_id)
                    .execute(db)
                    .await
                {
                    warn!(
                        identity_id = %identity_id,
                        error = %cleanup_err,
                        "Failed to clean up identity after profile creation failed"
                    );
                }
                return Err(AppError::database(
                    anyhow::Error::from(e).context("Failed to create profile"),
                ));
            }
        };

        for course_id in &dto.course_ids {
            if let Err(e) = sqlx::query(
                "INSERT INTO enrollments (profile_id, course_id) VALUES ($1, $2)",
            )
            .bind(profile.id)
            .bind(course_id)
            .execute(db)
            .await
            {
                warn!(
                    profile_id = %profile.id,
                    course_id = %course_id,
                    error = %e,
                    "Enrollment failed during student creation"
                );
            }
        }

        keys::invalidate::student(cache, Some(profile.id)).await;

        Ok(profile)
    }

    #[instrument(skip(db, cache))]
    pub async fn get_students(
        db: &PgPool,
        cache: Option<&RedisCache>,
    ) -> Result<Vec<Profile>, AppError> {
        let key = keys::students::list();
        if let Some(cache) = cache {
            if let Some(cached) = cache.get::<Vec<Profile>>(&key).await {
                return Ok(cached);
            }
        }

        let students = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, name, email, role, created_at
            FROM profiles
            WHERE role = 'student'
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
        .context("Failed to fetch students")
        .map_err(AppError::database)?;

        if let Some(cache) = cache {
            let _ = cache.set(&key, &students).await;
        }

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_student_by_id(db: &PgPool, id: Uuid) -> Result<Profile, AppError> {
        let student = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, name, email, role, created_at
            FROM profiles
            WHERE id = $1 AND role = 'student'
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by ID")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

        Ok(student)
    }

    /// Update a student. Credential changes hit the identity row first,
    /// then the profile row; role is never touched.
    #[instrument(skip(db, cache, dto))]
    pub async fn update_student(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Profile, AppError> {
        let existing = Self::get_student_by_id(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let email = dto
            .email
            .map(|e| e.trim().to_lowercase())
            .unwrap_or(existing.email);

        if let Some(password) = dto.password {
            if password.len() < 6 {
                return Err(AppError::unprocessable(
                    "Password must be at least 6 characters",
                ));
            }
            let hashed_password = hash_password(&password)?;
            sqlx::query("UPDATE identities SET password = $1 WHERE id = $2")
                .bind(&hashed_password)
                .bind(id)
                .execute(db)
                .await
                .context("Failed to update password")
                .map_err(AppError::database)?;
        }

        sqlx::query("UPDATE identities SET email = $1 WHERE id = $2")
            .bind(&email)
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(format!(
                            "A student with email {} already exists",
                            email
                        ));
                    }
                }
                AppError::database(anyhow::Error::from(e).context("Failed to update identity"))
            })?;

        let student = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET name = $1, email = $2
            WHERE id = $3 AND role = 'student'
            RETURNING id, name, email, role, created_at
            "#,
        )
        .bind(name.trim())
        .bind(&email)
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update student")
        .map_err(AppError::database)?;

        keys::invalidate::student(cache, Some(id)).await;

        Ok(student)
    }

    /// Delete a student. A single delete on the identity row; the
    /// database cascades identity -> profile -> enrollments.
    #[instrument(skip(db, cache))]
    pub async fn delete_student(
        db: &PgPool,
        cache: Option<&RedisCache>,
        id: Uuid,
    ) -> Result<(), AppError> {
        Self::get_student_by_id(db, id).await?;

        let result = sqlx::query("DELETE FROM identities WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Student not found"));
        }

        keys::invalidate::student(cache, Some(id)).await;

        Ok(())
    }
}
