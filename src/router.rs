use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::gate::route_gate;
use crate::middleware::role::{require_admin, require_student};
use crate::modules::auth::router::init_auth_router;
use crate::modules::course_modules::router::{init_course_modules_router, init_modules_router};
use crate::modules::courses::router::init_courses_router;
use crate::modules::dashboard::router::init_dashboard_router;
use crate::modules::enrollments::router::init_student_enrollments_router;
use crate::modules::students::router::init_students_router;
use crate::modules::videos::router::{init_module_videos_router, init_videos_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    let static_dir = state.server_config.static_dir.clone();
    let index = format!("{}/index.html", static_dir);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/courses",
                    init_courses_router()
                        .nest("/{course_id}/modules", init_course_modules_router())
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest(
                    "/modules",
                    init_modules_router()
                        .nest("/{module_id}/videos", init_module_videos_router())
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest(
                    "/videos",
                    init_videos_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest(
                    "/students",
                    init_students_router()
                        .nest(
                            "/{student_id}/enrollments",
                            init_student_enrollments_router(),
                        )
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .nest(
                    "/dashboard",
                    init_dashboard_router().route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        require_student,
                    )),
                ),
        )
        // Page routes: the SPA shell. The gate below decides who may load
        // which area before the static handler ever runs.
        .fallback_service(ServeDir::new(&static_dir).not_found_service(ServeFile::new(index)))
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn_with_state(state.clone(), route_gate))
        .layer(middleware::from_fn(logging_middleware))
}
