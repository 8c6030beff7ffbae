use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::{AuthUser, SESSION_COOKIE};
use crate::modules::profiles::model::Profile;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse, MessageResponse};
use super::service::AuthService;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let response = AuthService::login(&state.db, dto, &state.jwt_config).await?;

    let cookie = Cookie::build((SESSION_COOKIE, response.access_token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(response)))
}

/// Sign out and clear the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");

    (
        jar.remove(cookie),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// Get the current caller's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current profile", body = Profile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []), ("session_cookie" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let profile_id = auth_user.profile_id()?;
    let profile = AuthService::current_profile(&state.db, profile_id).await?;
    Ok(Json(profile))
}
