use go_eval::{Status, Stone};
use go_eval_host::GameMode;

use crate::common::connected;

#[tokio::test]
async fn clear_resets_both_sides() {
    let (driver, engine) = connected(9, GameMode::Manual);
    driver.play((4, 4)).await.unwrap();
    driver.resign(Stone::White).await.unwrap();

    driver.clear().await.unwrap();

    assert_eq!(engine.count("clear_board"), 1);
    assert!(engine.state().goban.is_empty());
    driver
        .with_session(|s| {
            assert_eq!(s.status(), Status::Playing);
            assert!(s.goban().is_empty());
            assert!(s.history().is_empty());
            assert!(s.series().win_rate.is_empty());
        })
        .await;
}

#[tokio::test]
async fn engine_failure_still_resets_locally() {
    let (driver, engine) = connected(9, GameMode::Manual);
    driver.play((4, 4)).await.unwrap();
    {
        let mut state = engine.state();
        state.fail_clear = true;
        state.fail_showboard = true;
    }

    driver.clear().await.unwrap();

    assert!(driver.with_session(|s| s.goban().is_empty()).await);
    assert_eq!(driver.last_error(), None);
    assert!(!driver.is_thinking());
}

#[tokio::test(start_paused = true)]
async fn engine_only_restarts_after_clear() {
    let (driver, engine) = connected(9, GameMode::EngineOnly);
    engine.script(&["E5"]);

    driver.clear().await.unwrap();
    assert!(driver.has_pending_continuation());

    tokio::time::sleep(std::time::Duration::from_millis(501)).await;
    crate::common::settle().await;
    assert_eq!(engine.count("genmove"), 1);
    assert_eq!(driver.with_session(|s| s.move_count()).await, 1);
    driver.set_mode(GameMode::Manual).await;
}
