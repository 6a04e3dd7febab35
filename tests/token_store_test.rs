// ABOUTME: Unit tests for file-backed refresh-token persistence
// ABOUTME: Round-trip, missing-file behavior, and newline trimming
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use anyhow::Result;
use withings_bridge::token_store::TokenStore;

#[tokio::test]
async fn test_load_missing_file_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("REFRESH_TOKEN"));

    assert_eq!(store.load().await, "");
}

#[tokio::test]
async fn test_save_then_load_round_trips() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("REFRESH_TOKEN"));

    store.save("a-refresh-token").await?;
    assert_eq!(store.load().await, "a-refresh-token");

    Ok(())
}

#[tokio::test]
async fn test_save_overwrites_previous_value() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("REFRESH_TOKEN"));

    store.save("first").await?;
    store.save("second").await?;

    assert_eq!(store.load().await, "second");
    Ok(())
}

#[tokio::test]
async fn test_trailing_newline_trimmed_on_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("REFRESH_TOKEN");

    // Hand-provisioned token files often end with a newline.
    tokio::fs::write(&path, "pasted-token\n").await?;

    let store = TokenStore::new(&path);
    assert_eq!(store.load().await, "pasted-token");

    Ok(())
}

#[tokio::test]
async fn test_no_temp_file_left_behind() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = TokenStore::new(dir.path().join("REFRESH_TOKEN"));

    store.save("a-token").await?;

    let entries: Vec<_> = std::fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("REFRESH_TOKEN")]);

    Ok(())
}
