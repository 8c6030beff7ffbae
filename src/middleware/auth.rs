use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::modules::auth::model::Claims;
use crate::modules::profiles::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Name of the HttpOnly cookie carrying the session token.
pub const SESSION_COOKIE: &str = "lectern_session";

/// Extractor that validates the session token and provides the caller's
/// claims. Accepts either an `Authorization: Bearer` header or the
/// session cookie; the header wins when both are present.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the caller's profile ID.
    pub fn profile_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid profile ID in token"))
    }

    /// Get the caller's email.
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Parse the caller's role claim. `None` means the token carries a
    /// role this build does not know, which callers must treat as
    /// unauthorized.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.0.role)
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .or_else(|| cookie_token(parts))
            .ok_or_else(|| AppError::unauthorized("Missing authentication token"))?;

        let claims = verify_token(&token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(AuthUser(claims("admin")).role(), Some(Role::Admin));
        assert_eq!(AuthUser(claims("student")).role(), Some(Role::Student));
        assert_eq!(AuthUser(claims("superuser")).role(), None);
    }

    #[test]
    fn test_profile_id() {
        let id = Uuid::new_v4();
        let mut c = claims("student");
        c.sub = id.to_string();
        assert_eq!(AuthUser(c).profile_id().unwrap(), id);
    }

    #[test]
    fn test_profile_id_rejects_garbage() {
        let mut c = claims("student");
        c.sub = "not-a-uuid".to_string();
        assert!(AuthUser(c).profile_id().is_err());
    }
}
