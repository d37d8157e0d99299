//! Integration tests for graceful shutdown of the watch command

use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::sync::watch;
use wardlens::cli::commands::watch::WatchArgs;

fn dataset() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "header\n\
         2024-01-01,C1,1980,UAE,F,L1,Dr. A,Consultant,Active,1.4,Cardiology,P,Plan,Cash,IP,5,3,Med,09:00,No,2500\n"
    )
    .unwrap();
    file
}

fn config(dataset: &NamedTempFile) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "[historical]\nsource = \"{}\"\n\n[access]\nunrestricted = true\n",
        dataset.path().display()
    )
    .unwrap();
    file
}

#[tokio::test]
async fn test_shutdown_signal_channel_creation() {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    assert!(!*shutdown_rx.borrow());

    shutdown_tx.send(true).unwrap();
    assert!(*shutdown_rx.borrow());
}

#[tokio::test]
async fn test_watch_stops_on_signal() {
    let data = dataset();
    let config = config(&data);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let _ = shutdown_tx.send(true);
    });

    let args = WatchArgs { department: None };
    let code = tokio::time::timeout(
        Duration::from_secs(5),
        args.execute(config.path().to_str().unwrap(), shutdown_rx),
    )
    .await
    .expect("watch did not stop")
    .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn test_watch_starts_cleanly_every_time() {
    let data = dataset();
    let config = config(&data);

    for _ in 0..25 {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let _ = shutdown_tx.send(true);
        });

        let code = tokio::time::timeout(
            Duration::from_secs(5),
            WatchArgs { department: None }.execute(config.path().to_str().unwrap(), shutdown_rx),
        )
        .await
        .expect("watch did not stop")
        .expect("watch failed to start");
        assert_eq!(code, 0);
    }
}

#[tokio::test]
async fn test_watch_returns_immediately_when_already_signalled() {
    let data = dataset();
    let config = config(&data);
    let (_shutdown_tx, shutdown_rx) = watch::channel(true);

    let args = WatchArgs {
        department: Some("Cardiology".to_string()),
    };
    let code = args
        .execute(config.path().to_str().unwrap(), shutdown_rx)
        .await
        .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn test_watch_reports_config_error() {
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let args = WatchArgs { department: None };
    let code = args
        .execute("/no/such/wardlens.toml", shutdown_rx)
        .await
        .unwrap();
    assert_eq!(code, 2);
}
