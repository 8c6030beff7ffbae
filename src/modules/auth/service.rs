use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::profiles::model::Profile;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct IdentityRow {
            id: Uuid,
            password: String,
        }

        let identity = sqlx::query_as::<_, IdentityRow>(
            "SELECT id, password FROM identities WHERE email = $1",
        )
        .bind(dto.email.trim().to_lowercase())
        .fetch_optional(db)
        .await
        .context("Failed to look up identity")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &identity.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, name, email, role, created_at FROM profiles WHERE id = $1",
        )
        .bind(identity.id)
        .fetch_optional(db)
        .await
        .context("Failed to load profile")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("No profile exists for this account"))?;

        let access_token =
            create_access_token(profile.id, &profile.email, profile.role, jwt_config)?;

        Ok(LoginResponse {
            access_token,
            profile,
        })
    }

    #[instrument(skip(db))]
    pub async fn current_profile(db: &PgPool, profile_id: Uuid) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, name, email, role, created_at FROM profiles WHERE id = $1",
        )
        .bind(profile_id)
        .fetch_optional(db)
        .await
        .context("Failed to load profile")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

        Ok(profile)
    }
}
