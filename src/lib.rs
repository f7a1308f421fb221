pub mod auth;
pub mod config;
pub mod error;

use crate::auth::jwt::JwtAuthenticator;
use crate::auth::middleware::{require_auth, AuthLayerState};
use crate::auth::{commence, AuthResult};
use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};
use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the HTTP application with the authentication entry point wired in
pub fn build_app(config: &ServiceConfig) -> Result<Router> {
    let authenticator = JwtAuthenticator::new(&config.security.jwt)?;
    let auth_state = AuthLayerState::new(
        Arc::new(authenticator),
        commence,
        config.security.protected_paths.clone(),
    );

    Ok(Router::new()
        .route("/health", get(health))
        .fallback(whoami)
        .layer(middleware::from_fn_with_state(auth_state, require_auth))
        .layer(TraceLayer::new_for_http()))
}

async fn health() -> &'static str {
    "OK"
}

/// Protected paths answer with the authenticated subject
async fn whoami(auth: Option<Extension<AuthResult>>) -> Response {
    match auth {
        Some(Extension(auth_result)) => Json(json!({
            "subject": auth_result.subject,
            "claims": auth_result.claims,
        }))
        .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Initialize and run the server
pub async fn init_server(config: ServiceConfig) -> Result<()> {
    config.validate()?;

    info!("Starting authentication service");
    info!(
        "Server listening on {}:{}",
        config.server.host, config.server.port
    );
    info!(
        "Protecting {} path prefixes",
        config.security.protected_paths.len()
    );

    let app = build_app(&config)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Ready to accept connections");

    axum::serve(listener, app)
        .await
        .map_err(|e| ServiceError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Initialize tracing/logging
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_entry_point=debug,tower_http=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();
}
