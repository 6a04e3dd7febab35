// ABOUTME: Sync pipeline tests with a stubbed measurement provider
// ABOUTME: Snapshot publication, stale-read-on-failure, and empty-history guarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};
use withings_bridge::constants::measures;
use withings_bridge::errors::{FetchError, SyncError};
use withings_bridge::providers::{BodyCompositionProvider, Measure, MeasureGroup};
use withings_bridge::sync::{ChangeNotifier, SyncService};

const HEIGHT_CM: f64 = 175.0;

/// Provider returning a scripted sequence of fetch outcomes.
struct StubProvider {
    responses: Mutex<VecDeque<Result<Vec<MeasureGroup>, FetchError>>>,
}

impl StubProvider {
    fn new(responses: Vec<Result<Vec<MeasureGroup>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
        })
    }
}

#[async_trait]
impl BodyCompositionProvider for StubProvider {
    async fn fetch_measurements(
        &self,
        _access_token: &str,
    ) -> Result<Vec<MeasureGroup>, FetchError> {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::MalformedResponse))
    }
}

fn complete_group(date: i64) -> MeasureGroup {
    MeasureGroup {
        date,
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
    }
}

fn service(provider: Arc<StubProvider>) -> SyncService {
    SyncService::new(provider, ChangeNotifier::new(None), HEIGHT_CM)
}

#[tokio::test]
async fn test_successful_sync_publishes_sorted_snapshot() {
    let provider = StubProvider::new(vec![Ok(vec![
        complete_group(1_700_000_200),
        complete_group(1_700_000_100),
    ])]);
    let sync = service(provider);

    sync.sync("token").await.unwrap();

    let snapshot = sync.snapshot().await;
    assert_eq!(snapshot.history.len(), 2);
    assert_eq!(snapshot.history[0].timestamp.timestamp(), 1_700_000_100);
    assert_eq!(snapshot.history[1].timestamp.timestamp(), 1_700_000_200);
    assert_eq!(
        snapshot.current.as_ref(),
        snapshot.history.last(),
        "current must be the last history point"
    );
}

#[tokio::test]
async fn test_fetch_rejection_leaves_snapshot_unchanged() {
    let provider = StubProvider::new(vec![
        Ok(vec![complete_group(1_700_000_100)]),
        Err(FetchError::ProviderRejected { status: 401 }),
    ]);
    let sync = service(provider);

    sync.sync("token").await.unwrap();
    let before = sync.snapshot().await;

    let err = sync.sync("token").await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Fetch(FetchError::ProviderRejected { status: 401 })
    ));

    let after = sync.snapshot().await;
    assert_eq!(*before, *after, "failed fetch must not touch the snapshot");
}

#[tokio::test]
async fn test_empty_transform_leaves_snapshot_unchanged() {
    // Second fetch parses but every group is a manual correction, so the
    // transformed history is empty and must not unpublish real data.
    let corrected = MeasureGroup {
        attrib: 2,
        ..complete_group(1_700_000_200)
    };
    let provider = StubProvider::new(vec![
        Ok(vec![complete_group(1_700_000_100)]),
        Ok(vec![corrected]),
    ]);
    let sync = service(provider);

    sync.sync("token").await.unwrap();
    let before = sync.snapshot().await;

    let err = sync.sync("token").await.unwrap_err();
    assert!(matches!(err, SyncError::EmptyHistory));

    let after = sync.snapshot().await;
    assert_eq!(*before, *after);
}

#[tokio::test]
async fn test_change_notification_fires_once_on_count_change() -> Result<()> {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&webhook)
        .await;

    let provider = StubProvider::new(vec![
        Ok(vec![complete_group(1_700_000_100)]),
        Ok(vec![
            complete_group(1_700_000_100),
            complete_group(1_700_000_200),
        ]),
    ]);
    let sync = SyncService::new(provider, ChangeNotifier::new(Some(webhook.uri())), HEIGHT_CM);

    // First sync only seeds the baseline; no notification.
    sync.sync("token").await?;
    // Second sync sees the count move from 1 to 2 and notifies exactly once.
    sync.sync("token").await?;

    // The notification is fire-and-forget on a spawned task.
    tokio::time::sleep(Duration::from_millis(200)).await;
    webhook.verify().await;

    Ok(())
}

#[tokio::test]
async fn test_initial_fetch_failure_keeps_empty_snapshot() {
    let provider = StubProvider::new(vec![Err(FetchError::ProviderRejected { status: 2554 })]);
    let sync = service(provider);

    assert!(sync.sync("token").await.is_err());

    let snapshot = sync.snapshot().await;
    assert!(snapshot.current.is_none());
    assert!(snapshot.history.is_empty());
}
