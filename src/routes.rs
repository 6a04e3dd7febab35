// ABOUTME: HTTP route handlers: snapshot reads, health, and the authorization flow
// ABOUTME: Thin axum handlers over the sync service and token manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP routes.
//!
//! Read endpoints never block on upstream work and never fail: they serve
//! the last published snapshot, however stale. The callback route is the
//! one-time interactive authorization-code exchange.

use crate::config::ServerConfig;
use crate::sync::SyncService;
use crate::token_manager::TokenManager;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, warn};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (authorize URL construction)
    pub config: Arc<ServerConfig>,
    /// Credential lifecycle (callback exchange)
    pub tokens: Arc<TokenManager>,
    /// Published snapshot source
    pub sync: Arc<SyncService>,
}

/// Query parameters of the authorization callback.
#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

/// Bridge HTTP routes.
pub struct BridgeRoutes;

impl BridgeRoutes {
    /// Create the full router with permissive CORS and request tracing.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/weight", get(Self::handle_weight))
            .route("/v1/summary", get(Self::handle_summary))
            .route("/withings/authenticate", get(Self::handle_authenticate))
            .route("/withings-callback", get(Self::handle_callback))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }

    /// The current snapshot: `{current, history}`.
    async fn handle_weight(State(state): State<AppState>) -> Response {
        let snapshot = state.sync.snapshot().await;
        Json((*snapshot).clone()).into_response()
    }

    /// Aggregate summary endpoint; currently just wraps the weight
    /// snapshot.
    async fn handle_summary(State(state): State<AppState>) -> Response {
        let snapshot = state.sync.snapshot().await;
        Json(serde_json::json!({ "weight": &*snapshot })).into_response()
    }

    /// Redirect the user to the Withings consent page.
    async fn handle_authenticate(State(state): State<AppState>) -> Response {
        match state.config.withings.authorization_url() {
            Ok(url) => Redirect::temporary(&url).into_response(),
            Err(e) => {
                error!("failed to build authorization URL: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }

    /// One-time authorization-code exchange.
    async fn handle_callback(
        State(state): State<AppState>,
        Query(params): Query<CallbackQuery>,
    ) -> Response {
        let Some(code) = params.code else {
            return (StatusCode::BAD_REQUEST, "missing code parameter").into_response();
        };

        match state.tokens.exchange_authorization_code(&code).await {
            Ok(()) => (StatusCode::OK, "OK").into_response(),
            Err(e) => {
                warn!("authorization code exchange failed: {e}");
                (StatusCode::BAD_GATEWAY, "token exchange failed").into_response()
            }
        }
    }
}
