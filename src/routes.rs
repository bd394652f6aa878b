use axum::{
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health::health))
        .merge(resource_routes())
        .merge(progress_routes())
        .merge(auth_routes())
        .merge(diagnostics_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/api/course-types", get(handlers::course_types::list))
        .route("/api/teachers", get(handlers::teachers::list))
        .route("/api/promo-codes", get(handlers::promo_codes::list))
        .route("/api/promo-codes/:id", patch(handlers::promo_codes::update))
        .route("/api/student-media", get(handlers::student_media::list))
        .route(
            "/api/student-media/:id/favorite",
            patch(handlers::student_media::set_favorite),
        )
        .route(
            "/api/student-media/:id/status",
            patch(handlers::student_media::set_status),
        )
}

fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/api/version-comparison", get(handlers::progress::version_comparison))
        .route(
            "/api/init-progress-data",
            get(handlers::progress::init_advisory).post(handlers::progress::init_progress_data),
        )
}

fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/auth/logout", post(handlers::auth::logout))
}

fn diagnostics_routes() -> Router<AppState> {
    Router::new()
        .route("/api/diagnostics/env", get(handlers::diagnostics::env_presence))
        .route("/api/diagnostics/echo", post(handlers::diagnostics::echo))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Hanami API",
            "version": version,
            "description": "Backend API for the Hanami music-education platform",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "course_types": "GET /api/course-types",
                "teachers": "GET /api/teachers",
                "promo_codes": "GET /api/promo-codes, PATCH /api/promo-codes/:id",
                "student_media": "GET /api/student-media, PATCH /api/student-media/:id/{favorite,status}",
                "progress": "GET /api/version-comparison, POST /api/init-progress-data",
                "auth": "POST /api/auth/logout",
                "diagnostics": "GET /api/diagnostics/env, POST /api/diagnostics/echo",
            }
        }
    }))
}
