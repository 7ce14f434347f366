mod common;

use std::{sync::Arc, time::Duration};

use common::{Reply, STATUS_JSON, closed_port, spawn_server, status_frame};
use mcsearch::{MonitorConfig, RefreshReport, StatusStore, StatusUpdater, TargetConfig};

fn target(name: &str, port: u16, group: &str) -> TargetConfig {
    TargetConfig {
        name: name.to_string(),
        host: "127.0.0.1".to_string(),
        port,
        group: group.to_string(),
    }
}

fn config(targets: Vec<TargetConfig>) -> Arc<MonitorConfig> {
    Arc::new(MonitorConfig {
        interval: Duration::from_millis(100),
        timeout: Duration::from_millis(500),
        targets,
        ..MonitorConfig::default()
    })
}

#[tokio::test]
async fn test_refresh_groups_results_in_config_order() {
    let first = spawn_server(Reply::Bytes(status_frame(STATUS_JSON))).await;
    let other = spawn_server(Reply::Bytes(status_frame(
        r#"{"players":{"max":10,"online":0},"description":"Other"}"#,
    )))
    .await;
    let down = closed_port().await;

    let config = config(vec![
        target("A", first, "main"),
        target("Down", down, "main"),
        target("B", other, "main"),
        target("C", other, "side"),
    ]);
    let store = Arc::new(StatusStore::new());
    let updater = StatusUpdater::new(config, Arc::clone(&store));

    let report = updater.refresh_once().await;

    assert_eq!(report, RefreshReport { succeeded: 3, failed: 1 });
    assert_eq!(
        store.lookup("main").unwrap(),
        format!(
            "1. [ A ](1/5\n1.X\n)\nMotd:Hi\n地址:127.0.0.1:{first}\n\
             2. [ B ](0/10)\nMotd:Other\n地址:127.0.0.1:{other}"
        )
    );
    assert_eq!(
        store.lookup("side").unwrap(),
        format!("1. [ C ](0/10)\nMotd:Other\n地址:127.0.0.1:{other}")
    );
}

#[tokio::test]
async fn test_refresh_drops_groups_without_successes() {
    let down = closed_port().await;
    let store = Arc::new(StatusStore::new());
    store.replace([("gone".to_string(), "stale".to_string())].into());

    let updater = StatusUpdater::new(config(vec![target("Down", down, "gone")]), Arc::clone(&store));
    let report = updater.refresh_once().await;

    assert_eq!(report, RefreshReport { succeeded: 0, failed: 1 });
    assert_eq!(store.lookup("gone"), None);
}

#[tokio::test]
async fn test_refresh_is_bounded_by_timeout() {
    let silent = spawn_server(Reply::Silent).await;
    let up = spawn_server(Reply::Bytes(status_frame(STATUS_JSON))).await;
    let store = Arc::new(StatusStore::new());
    let updater = StatusUpdater::new(
        config(vec![target("Silent", silent, "g"), target("Up", up, "g")]),
        Arc::clone(&store),
    );

    let started = std::time::Instant::now();
    let report = updater.refresh_once().await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(report, RefreshReport { succeeded: 1, failed: 1 });
    assert!(store.lookup("g").unwrap().starts_with("1. [ Up ]("));
}

#[tokio::test]
async fn test_updater_start_and_stop() {
    let port = spawn_server(Reply::Bytes(status_frame(STATUS_JSON))).await;
    let store = Arc::new(StatusStore::new());
    let updater = StatusUpdater::new(config(vec![target("A", port, "g")]), Arc::clone(&store));
    let mut refreshed = updater.subscribe();

    let handle = updater.start();
    assert!(handle.is_running());

    // Two refreshes prove the loop keeps ticking.
    for _ in 0..2 {
        tokio::time::timeout(Duration::from_secs(5), refreshed.changed())
            .await
            .expect("refresh within deadline")
            .unwrap();
        let report = *refreshed.borrow_and_update();
        assert_eq!(report, Some(RefreshReport { succeeded: 1, failed: 0 }));
    }
    assert!(store.lookup("g").is_some());

    tokio::time::timeout(Duration::from_secs(5), handle.stop())
        .await
        .expect("updater stops promptly");

    // The sender goes away with the stopped loop.
    let drained = tokio::time::timeout(Duration::from_secs(5), async {
        while refreshed.changed().await.is_ok() {}
    })
    .await;
    assert!(drained.is_ok());
}
