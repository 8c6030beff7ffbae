//! Redirect-based role gating for the page routes.
//!
//! Every inbound request outside the public prefixes is checked against
//! the caller's session: anonymous callers are sent to the login page,
//! admins are kept inside `/admin` (and `/dashboard`), students are kept
//! inside `/dashboard`. The decision logic is a pure function over the
//! request path and the resolved session so it can be tested exhaustively;
//! the middleware only resolves the session cookie and applies the
//! decision.
//!
//! Token verification failures count as no session and unknown role
//! claims count as no role; the gate never grants access on a failed
//! lookup.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::middleware::auth::SESSION_COOKIE;
use crate::modules::profiles::model::Role;
use crate::state::AppState;
use crate::utils::jwt::verify_token;

pub const LOGIN_PATH: &str = "/auth";
pub const ADMIN_HOME: &str = "/admin";
pub const DASHBOARD_HOME: &str = "/dashboard";

/// The caller's session as seen by the gate, resolved once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateSession {
    /// No session cookie, or the token failed verification.
    Anonymous,
    /// A valid session; `None` when the role claim is missing or unknown.
    Authenticated(Option<Role>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
}

/// True when `path` is `prefix` itself or a descendant of it.
fn in_area(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Paths the gate never touches: login area, root, static assets, the
/// JSON API, and the API documentation surfaces.
fn is_public(path: &str) -> bool {
    path == "/"
        || in_area(path, LOGIN_PATH)
        || in_area(path, "/api")
        || in_area(path, "/assets")
        || path == "/favicon.ico"
        || in_area(path, "/swagger-ui")
        || in_area(path, "/scalar")
        || in_area(path, "/api-docs")
}

/// The gate's routing table. Rules are evaluated in order:
///
/// 1. admins outside `/admin` and `/dashboard` go to the admin home;
/// 2. students outside `/dashboard` go to the dashboard home;
/// 3. non-admins under `/admin` go to the dashboard home;
/// 4. sessions with no usable role under `/dashboard` go back to login.
pub fn decide(path: &str, session: GateSession) -> GateDecision {
    if is_public(path) {
        return GateDecision::Allow;
    }

    let role = match session {
        GateSession::Anonymous => return GateDecision::Redirect(LOGIN_PATH),
        GateSession::Authenticated(role) => role,
    };

    let in_admin = in_area(path, ADMIN_HOME);
    let in_dashboard = in_area(path, DASHBOARD_HOME);

    match role {
        Some(Role::Admin) if !in_admin && !in_dashboard => {
            return GateDecision::Redirect(ADMIN_HOME);
        }
        Some(Role::Student) if !in_dashboard => {
            return GateDecision::Redirect(DASHBOARD_HOME);
        }
        _ => {}
    }

    if in_admin && role != Some(Role::Admin) {
        GateDecision::Redirect(DASHBOARD_HOME)
    } else if in_dashboard && role.is_none() {
        GateDecision::Redirect(LOGIN_PATH)
    } else {
        GateDecision::Allow
    }
}

/// Middleware wrapping the whole application. Stateless per request; the
/// session is resolved from the cookie alone.
pub async fn route_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let session = match jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| verify_token(cookie.value(), &state.jwt_config).ok())
    {
        Some(claims) => GateSession::Authenticated(Role::parse(&claims.role)),
        None => GateSession::Anonymous,
    };

    match decide(req.uri().path(), session) {
        GateDecision::Allow => next.run(req).await,
        GateDecision::Redirect(target) => Redirect::to(target).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_PATHS: &[&str] = &[
        "/admin",
        "/admin/courses",
        "/admin/courses/42",
        "/admin/courses/42/modules/7",
        "/admin/students",
        "/admin/videos",
        "/admin/modules",
    ];

    const DASHBOARD_PATHS: &[&str] = &[
        "/dashboard",
        "/dashboard/courses",
        "/dashboard/courses/42",
        "/dashboard/courses/42/modules/7",
        "/dashboard/courses/42/modules/7/videos/9",
    ];

    const OUTSIDE_PATHS: &[&str] = &["/courses", "/courses/42", "/courses/42/modules/7"];

    fn admin() -> GateSession {
        GateSession::Authenticated(Some(Role::Admin))
    }

    fn student() -> GateSession {
        GateSession::Authenticated(Some(Role::Student))
    }

    fn roleless() -> GateSession {
        GateSession::Authenticated(None)
    }

    #[test]
    fn test_public_paths_bypass() {
        for path in [
            "/",
            "/auth",
            "/auth/callback",
            "/api/courses",
            "/assets/app.js",
            "/favicon.ico",
            "/swagger-ui",
            "/scalar",
            "/api-docs/openapi.json",
        ] {
            assert_eq!(
                decide(path, GateSession::Anonymous),
                GateDecision::Allow,
                "{path} should bypass the gate"
            );
        }
    }

    #[test]
    fn test_no_session_redirects_to_login_on_every_protected_path() {
        for path in ADMIN_PATHS
            .iter()
            .chain(DASHBOARD_PATHS)
            .chain(OUTSIDE_PATHS)
        {
            assert_eq!(
                decide(path, GateSession::Anonymous),
                GateDecision::Redirect(LOGIN_PATH),
                "{path} without a session should go to login"
            );
        }
    }

    #[test]
    fn test_admin_allowed_in_admin_and_dashboard() {
        for path in ADMIN_PATHS.iter().chain(DASHBOARD_PATHS) {
            assert_eq!(decide(path, admin()), GateDecision::Allow, "{path}");
        }
    }

    #[test]
    fn test_admin_redirected_home_from_outside_paths() {
        for path in OUTSIDE_PATHS {
            assert_eq!(
                decide(path, admin()),
                GateDecision::Redirect(ADMIN_HOME),
                "{path}"
            );
        }
    }

    #[test]
    fn test_student_allowed_in_dashboard_only() {
        for path in DASHBOARD_PATHS {
            assert_eq!(decide(path, student()), GateDecision::Allow, "{path}");
        }
        for path in ADMIN_PATHS.iter().chain(OUTSIDE_PATHS) {
            assert_eq!(
                decide(path, student()),
                GateDecision::Redirect(DASHBOARD_HOME),
                "{path}"
            );
        }
    }

    #[test]
    fn test_unknown_role_in_admin_area_goes_to_dashboard() {
        for path in ADMIN_PATHS {
            assert_eq!(
                decide(path, roleless()),
                GateDecision::Redirect(DASHBOARD_HOME),
                "{path}"
            );
        }
    }

    #[test]
    fn test_unknown_role_in_dashboard_goes_to_login() {
        for path in DASHBOARD_PATHS {
            assert_eq!(
                decide(path, roleless()),
                GateDecision::Redirect(LOGIN_PATH),
                "{path}"
            );
        }
    }

    #[test]
    fn test_prefix_matching_is_segment_aware() {
        // "/administrator" is not inside "/admin"
        assert_eq!(
            decide("/administrator", student()),
            GateDecision::Redirect(DASHBOARD_HOME)
        );
        assert_eq!(decide("/administrator", admin()), GateDecision::Redirect(ADMIN_HOME));
        // "/authx" is not the login area
        assert_eq!(
            decide("/authx", GateSession::Anonymous),
            GateDecision::Redirect(LOGIN_PATH)
        );
    }
}
