//! Middleware for request processing.
//!
//! - [`auth`]: session extraction (Bearer header or session cookie)
//! - [`role`]: role checks for API routers
//! - [`gate`]: redirect-based role gating for the page routes
//!
//! # Session Flow
//!
//! 1. Login issues a JWT, returned in the body and set as an HttpOnly
//!    session cookie.
//! 2. `AuthUser` validates the token once per request and exposes the
//!    claims; role checks work off the claims without further lookups
//!    (role is immutable after profile creation).
//! 3. API routers are wrapped in `require_admin`/`require_student`
//!    layers; page routes go through the gate, which redirects instead
//!    of returning errors.

pub mod auth;
pub mod gate;
pub mod role;
