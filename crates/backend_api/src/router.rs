use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{admin_handlers, auth_handlers, client_handlers, handlers, state::AppState};

pub const INDEX_PAGE: &str = "main.html";

/// Create the main application router with all API endpoints.
/// When `static_dir` is set, `/` serves its main page and unknown paths fall through to its files.
pub fn create_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Ledger analytics
        .route("/api/transactions/monthly", get(handlers::monthly_comparison))
        .route(
            "/api/transactions/category-averages",
            get(handlers::category_average_amounts),
        )
        // Authentication
        .route("/api/auth/client/login", post(auth_handlers::client_login))
        .route("/api/auth/admin/login", post(auth_handlers::admin_login))
        .route("/api/auth/logout", post(auth_handlers::logout))
        .route("/api/auth/me", get(auth_handlers::me))
        // Client space
        .route("/api/client/profile", get(client_handlers::profile))
        .route("/api/client/transactions", get(client_handlers::transactions))
        .route("/api/client/monthly", get(client_handlers::monthly))
        .route("/api/client/score", get(client_handlers::score))
        // Administration
        .route("/api/admin/clients", get(admin_handlers::list_clients))
        .route(
            "/api/admin/clients/:client_id/score",
            get(admin_handlers::client_score),
        )
        .route(
            "/api/admin/clients/:client_id/transactions",
            get(admin_handlers::client_transactions),
        )
        // Assistant
        .route("/api/chat", post(handlers::chat));

    if let Some(dir) = static_dir {
        router = router
            .route_service("/", ServeFile::new(dir.join(INDEX_PAGE)))
            .fallback_service(ServeDir::new(dir));
    }

    router
        // Add shared state
        .with_state(state)
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
