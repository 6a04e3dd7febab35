// ABOUTME: HTTP route tests exercised in-process
// ABOUTME: Health, snapshot reads, authorization redirect, and callback validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use withings_bridge::config::{ServerConfig, WithingsConfig};
use withings_bridge::constants::measures;
use withings_bridge::errors::FetchError;
use withings_bridge::providers::{BodyCompositionProvider, Measure, MeasureGroup};
use withings_bridge::routes::{AppState, BridgeRoutes};
use withings_bridge::sync::{ChangeNotifier, SyncService};
use withings_bridge::token_manager::TokenManager;
use withings_bridge::token_store::TokenStore;

/// Provider returning one fixed complete reading.
struct FixedProvider;

#[async_trait]
impl BodyCompositionProvider for FixedProvider {
    async fn fetch_measurements(
        &self,
        _access_token: &str,
    ) -> Result<Vec<MeasureGroup>, FetchError> {
        Ok(vec![MeasureGroup {
            date: 1_700_000_000,
            attrib: 0,
            measures: vec![
                Measure {
                    value: 700,
                    kind: measures::WEIGHT,
                    unit: -1,
                },
                Measure {
                    value: 150,
                    kind: measures::FAT_RATIO,
                    unit: -1,
                },
            ],
        }])
    }
}

fn test_config(token_file: PathBuf) -> ServerConfig {
    ServerConfig {
        http_port: 8080,
        withings: WithingsConfig {
            client_id: "client-id".into(),
            client_secret: "client-secret".into(),
            redirect_uri: "http://localhost:8080/withings-callback".into(),
            token_url: "http://127.0.0.1:1/v2/oauth2".into(),
            measure_url: "http://127.0.0.1:1/measure".into(),
            authorize_url: "https://account.withings.com/oauth2_user/authorize2".into(),
        },
        token_file,
        webhook_url: None,
        user_height_cm: 175.0,
        sync_start_unix: 1_631_318_400,
        token_rotation_period: Duration::from_secs(3600),
        sync_period: Duration::from_secs(60),
    }
}

async fn test_state() -> (AppState, Arc<SyncService>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Arc::new(test_config(dir.path().join("REFRESH_TOKEN")));

    let store = TokenStore::new(&config.token_file);
    let tokens = Arc::new(TokenManager::load(config.withings.clone(), store).await);
    let sync = Arc::new(SyncService::new(
        Arc::new(FixedProvider),
        ChangeNotifier::new(None),
        config.user_height_cm,
    ));

    (
        AppState {
            config,
            tokens,
            sync: Arc::clone(&sync),
        },
        sync,
        dir,
    )
}

#[tokio::test]
async fn test_health_responds_ok() -> Result<()> {
    let (state, _sync, _dir) = test_state().await;
    let app = BridgeRoutes::router(state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["status"], "healthy");

    Ok(())
}

#[tokio::test]
async fn test_weight_serves_empty_snapshot_before_first_sync() -> Result<()> {
    let (state, _sync, _dir) = test_state().await;
    let app = BridgeRoutes::router(state);

    let response = app
        .oneshot(Request::builder().uri("/weight").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert!(body["current"].is_null());
    assert_eq!(body["history"], serde_json::json!([]));

    Ok(())
}

#[tokio::test]
async fn test_weight_serves_published_snapshot() -> Result<()> {
    let (state, sync, _dir) = test_state().await;
    sync.sync("token").await?;

    let app = BridgeRoutes::router(state);
    let response = app
        .oneshot(Request::builder().uri("/weight").body(Body::empty())?)
        .await?;

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;

    assert_eq!(body["history"].as_array().map(Vec::len), Some(1));
    assert!((body["current"]["weight"].as_f64().unwrap_or_default() - 70.0).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_summary_wraps_weight_snapshot() -> Result<()> {
    let (state, sync, _dir) = test_state().await;
    sync.sync("token").await?;

    let app = BridgeRoutes::router(state);
    let response = app
        .oneshot(Request::builder().uri("/v1/summary").body(Body::empty())?)
        .await?;

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;

    assert!(body["weight"]["current"].is_object());

    Ok(())
}

#[tokio::test]
async fn test_authenticate_redirects_to_consent_page() -> Result<()> {
    let (state, _sync, _dir) = test_state().await;
    let app = BridgeRoutes::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/withings/authenticate")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.starts_with("https://account.withings.com/oauth2_user/authorize2"));
    assert!(location.contains("client_id=client-id"));
    assert!(location.contains("scope=user.metrics"));

    Ok(())
}

#[tokio::test]
async fn test_callback_without_code_is_bad_request() -> Result<()> {
    let (state, _sync, _dir) = test_state().await;
    let app = BridgeRoutes::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/withings-callback")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
