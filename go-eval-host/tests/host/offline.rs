use std::time::Duration;

use go_eval::Status;
use go_eval_host::{Driver, GameMode, HostError};

use crate::common::host_config;

#[tokio::test(start_paused = true)]
async fn moves_apply_locally_without_an_engine() {
    let driver = Driver::offline(host_config(9, GameMode::VsEngine)).unwrap();
    assert!(!driver.is_connected());

    let outcome = driver.play((4, 4)).await.unwrap();
    assert_eq!(outcome.move_number, 1);
    assert!(!driver.has_pending_continuation());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(driver.with_session(|s| s.move_count()).await, 1);
}

#[tokio::test]
async fn engine_requests_fail_cleanly() {
    let driver = Driver::offline(host_config(9, GameMode::Manual)).unwrap();

    assert_eq!(driver.engine_move().await, Err(HostError::NotConnected));
    assert_eq!(driver.last_error(), Some("No engine connected".to_string()));
    assert_eq!(driver.synchronize().await, Err(HostError::NotConnected));
    driver.refresh_suggestions().await;
    assert!(driver.suggestions().is_empty());
    assert!(!driver.is_thinking());
}

#[tokio::test]
async fn passes_and_clear_work_offline() {
    let driver = Driver::offline(host_config(9, GameMode::Manual)).unwrap();
    assert_eq!(driver.pass().await, Ok(Status::Playing));
    assert_eq!(driver.pass().await, Ok(Status::WhiteWin));

    driver.clear().await.unwrap();
    assert_eq!(driver.with_session(|s| s.status()).await, Status::Playing);
}
