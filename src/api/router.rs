//! Router configuration and server setup.

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::auth::require_api_token;
use crate::api::handlers;
use crate::api::state::AppState;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/dashboard/", get(handlers::dashboard))
        .route(
            "/api/events/",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route("/api/events/create/", post(handlers::create_event))
        .route(
            "/api/events/:id/",
            get(handlers::get_event)
                .put(handlers::update_event)
                .delete(handlers::delete_event),
        )
        .route("/api/events/:id/update/", put(handlers::update_event))
        .route("/api/events/:id/delete/", delete(handlers::delete_event))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_token,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Starts the API server and runs until Ctrl-C.
pub async fn serve(state: AppState) -> Result<(), std::io::Error> {
    let addr = state.config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Calendar API listening on {}", addr);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}
