//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`; `/health` sits at the root.
//! Middleware: CORS, request tracing, request context (id and timing).

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::http::middleware::request_context;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Pronouns
        .route(
            "/pronouns",
            post(handlers::pronoun::create_pronoun).get(handlers::pronoun::list_pronouns),
        )
        .route(
            "/pronouns/{id}",
            get(handlers::pronoun::get_pronoun)
                .put(handlers::pronoun::update_pronoun)
                .delete(handlers::pronoun::delete_pronoun),
        )
        // Pronoun sets
        .route(
            "/pronoun-sets",
            post(handlers::pronoun_set::create_set).get(handlers::pronoun_set::list_sets),
        )
        .route(
            "/pronoun-sets/{id}",
            get(handlers::pronoun_set::get_set).delete(handlers::pronoun_set::delete_set),
        )
        // Auth
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        // Users (authenticated)
        .route("/users/me", get(handlers::user::me))
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(from_fn(request_context))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness check (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
