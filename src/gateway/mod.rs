pub mod handlers;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::{events, lots, speakers, user_auth};
use state::AppState;

/// Build the full API router.
///
/// `/api/health`, `/api/account/register` and `/api/account/login` are
/// public; everything else requires a bearer token.
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // Public Routes (no auth required)
    // ==========================================================================
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/account/register", post(user_auth::handlers::register))
        .route("/account/login", post(user_auth::handlers::login));

    // ==========================================================================
    // Protected Routes (JWT required)
    // ==========================================================================
    let account_routes = Router::new()
        .route(
            "/user",
            get(user_auth::handlers::get_user).put(user_auth::handlers::update_user),
        )
        .route("/roles", post(user_auth::handlers::create_role))
        .route(
            "/roles/{name}/users/{user_id}",
            post(user_auth::handlers::add_to_role),
        );

    let event_routes = Router::new()
        .route(
            "/",
            get(events::handlers::get_events).post(events::handlers::create_event),
        )
        .route(
            "/{id}",
            get(events::handlers::get_event)
                .put(events::handlers::update_event)
                .delete(events::handlers::delete_event),
        )
        .route(
            "/{id}/speakers/{speaker_id}",
            post(events::handlers::link_speaker).delete(events::handlers::unlink_speaker),
        );

    let lot_routes = Router::new()
        .route(
            "/{event_id}",
            get(lots::handlers::get_lots)
                .post(lots::handlers::create_lot)
                .put(lots::handlers::save_lots),
        )
        .route(
            "/{event_id}/{lot_id}",
            get(lots::handlers::get_lot).delete(lots::handlers::delete_lot),
        );

    let speaker_routes = Router::new()
        .route(
            "/",
            get(speakers::handlers::get_speakers).post(speakers::handlers::create_speaker),
        )
        .route(
            "/{id}",
            get(speakers::handlers::get_speaker)
                .put(speakers::handlers::update_speaker)
                .delete(speakers::handlers::delete_speaker),
        );

    let protected_routes = Router::new()
        .nest("/account", account_routes)
        .nest("/events", event_routes)
        .nest("/lots", lot_routes)
        .nest("/speakers", speaker_routes)
        .layer(from_fn_with_state(
            state.clone(),
            user_auth::jwt_auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start HTTP Gateway server
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    use anyhow::Context;

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {} (port {} may already be in use)",
            addr, config.port
        )
    })?;

    tracing::info!("🚀 Gateway listening on http://{}", addr);
    tracing::info!("📂 Public API:    /api/health, /api/account/{{register,login}}");
    tracing::info!("🔒 Protected API: /api/* (bearer token required)");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
