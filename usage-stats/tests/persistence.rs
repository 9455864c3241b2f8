use usage_stats::{StatsConfig, StatsError, UsageStats};

fn cfg(dir: &tempfile::TempDir) -> StatsConfig {
    StatsConfig {
        path: dir.path().join("nested").join("usage_stats.json"),
        minutes_per_message: 3.0,
    }
}

#[tokio::test]
async fn missing_file_starts_from_zero() {
    let dir = tempfile::tempdir().unwrap();
    let stats = UsageStats::load(cfg(&dir)).await.unwrap();

    let snap = stats.snapshot().await;
    assert_eq!(snap.total_messages, 0);
    assert!(snap.by_channel.is_empty());
    assert!(snap.first_message_at.is_none());
}

#[tokio::test]
async fn counters_survive_reload() {
    let dir = tempfile::tempdir().unwrap();

    let stats = UsageStats::load(cfg(&dir)).await.unwrap();
    stats.record("website").await;
    stats.record("website").await;
    stats.record("messenger").await;
    assert!(stats.path().exists());

    let reloaded = UsageStats::load(cfg(&dir)).await.unwrap();
    let snap = reloaded.snapshot().await;
    assert_eq!(snap.total_messages, 3);
    assert_eq!(snap.by_channel["website"], 2);
    assert_eq!(snap.by_channel["messenger"], 1);
    assert_eq!(snap.minutes_saved, 9.0);
    assert!(snap.first_message_at <= snap.last_message_at);
}

#[tokio::test]
async fn estimate_follows_current_rate_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let stats = UsageStats::load(cfg(&dir)).await.unwrap();
    for _ in 0..4 {
        stats.record("telegram").await;
    }

    let mut faster = cfg(&dir);
    faster.minutes_per_message = 5.0;
    let snap = UsageStats::load(faster).await.unwrap().snapshot().await;
    assert_eq!(snap.minutes_saved, 20.0);
    assert_eq!(snap.hours_saved, 0.33);
}

#[tokio::test]
async fn corrupt_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let c = cfg(&dir);
    std::fs::create_dir_all(c.path.parent().unwrap()).unwrap();
    std::fs::write(&c.path, b"{ not json").unwrap();

    let err = UsageStats::load(c).await.unwrap_err();
    assert!(matches!(err, StatsError::Json { .. }));
}

#[tokio::test]
async fn flush_writes_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let stats = UsageStats::load(cfg(&dir)).await.unwrap();
    stats.record("website").await;
    stats.flush().await.unwrap();

    let raw = std::fs::read_to_string(stats.path()).unwrap();
    assert!(raw.contains("\n  \"total_messages\": 1"));
    assert!(!dir.path().join("nested").join("usage_stats.json.tmp").exists());
}
