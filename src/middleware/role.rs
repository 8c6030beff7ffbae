//! Role-based authorization for the API routers.
//!
//! Admin routers are wrapped in [`require_admin`]; the student dashboard
//! router accepts both roles via [`require_student`]. Handlers that need
//! finer checks use [`check_role`]/[`check_any_role`] directly.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::middleware::auth::AuthUser;
use crate::modules::profiles::model::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Middleware function that checks the authenticated caller against a
/// list of allowed roles.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<Role>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    let role = auth_user
        .role()
        .ok_or_else(|| AppError::forbidden("Access denied. Unknown role."))?;

    if !allowed_roles.contains(&role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles, role
        )));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Route layer for admin-only routers.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Admin]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Route layer for the student-facing routers. Admins are allowed
/// through as well; they can see everything a student can.
pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![Role::Admin, Role::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Check that the caller has exactly the given role.
pub fn check_role(auth_user: &AuthUser, required_role: Role) -> Result<(), AppError> {
    let role = auth_user
        .role()
        .ok_or_else(|| AppError::forbidden("Access denied. Unknown role."))?;

    if role != required_role {
        return Err(AppError::forbidden(format!(
            "Access denied. Required role: {:?}, but user has role: {:?}",
            required_role, role
        )));
    }

    Ok(())
}

/// Check that the caller has one of the given roles.
pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    let role = auth_user
        .role()
        .ok_or_else(|| AppError::forbidden("Access denied. Unknown role."))?;

    if !allowed_roles.contains(&role) {
        return Err(AppError::forbidden(format!(
            "Access denied. Required roles: {:?}, but user has role: {:?}",
            allowed_roles, role
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::Claims;
    use uuid::Uuid;

    fn auth_user(role: &str) -> AuthUser {
        AuthUser(Claims {
            sub: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_check_role_exact_match() {
        assert!(check_role(&auth_user("admin"), Role::Admin).is_ok());
        assert!(check_role(&auth_user("student"), Role::Student).is_ok());
    }

    #[test]
    fn test_check_role_no_match() {
        assert!(check_role(&auth_user("student"), Role::Admin).is_err());
        assert!(check_role(&auth_user("admin"), Role::Student).is_err());
    }

    #[test]
    fn test_check_role_unknown_role_fails() {
        assert!(check_role(&auth_user("teacher"), Role::Admin).is_err());
        assert!(check_role(&auth_user(""), Role::Student).is_err());
    }

    #[test]
    fn test_check_any_role() {
        let allowed = [Role::Admin, Role::Student];
        assert!(check_any_role(&auth_user("admin"), &allowed).is_ok());
        assert!(check_any_role(&auth_user("student"), &allowed).is_ok());
        assert!(check_any_role(&auth_user("student"), &[Role::Admin]).is_err());
    }

    #[test]
    fn test_check_any_role_empty_list() {
        assert!(check_any_role(&auth_user("admin"), &[]).is_err());
    }
}
