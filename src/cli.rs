//! CLI commands.
//!
//! Admin accounts cannot be created through the API; the first (and any
//! further) admin is bootstrapped with `lectern create-admin`.

use sqlx::PgPool;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

/// Create an admin identity and profile.
///
/// Same sequential identity-then-profile shape as student creation,
/// including the identity cleanup if the profile insert fails.
pub async fn create_admin(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, AppError> {
    if password.len() < 6 {
        return Err(AppError::unprocessable(
            "Password must be at least 6 characters",
        ));
    }

    let email = email.trim().to_lowercase();
    let hashed_password = hash_password(password)?;

    let identity_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO identities (email, password) VALUES ($1, $2) RETURNING id",
    )
    .bind(&email)
    .bind(&hashed_password)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::bad_request(format!("An account with email {} already exists", email));
            }
        }
        AppError::database(anyhow::Error::from(e).context("Failed to create identity"))
    })?;

    if let Err(e) = sqlx::query("INSERT INTO profiles (id, name, email, role) VALUES ($1, $2, $3, 'admin')")
        .bind(identity_id)
        .bind(name.trim())
        .bind(&email)
        .execute(pool)
        .await
    {
        let _ = sqlx::query("DELETE FROM identities WHERE id = $1")
            .bind(identity_id)
            .execute(pool)
            .await;
        return Err(AppError::database(
            anyhow::Error::from(e).context("Failed to create admin profile"),
        ));
    }

    Ok(identity_id)
}
