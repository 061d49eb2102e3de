use go_eval::{EvalError, Stone};
use go_eval_host::{GameMode, HostError};

use crate::common::{connected, settle};

#[tokio::test(start_paused = true)]
async fn moves_are_refused_while_engine_thinks() {
    let (driver, engine) = connected(9, GameMode::Manual);
    engine.state().hold_genmove = true;
    engine.script(&["E5"]);

    let background = driver.clone();
    let pending = tokio::spawn(async move { background.engine_move().await });
    settle().await;

    assert!(driver.is_thinking());
    assert_eq!(driver.play((2, 2)).await, Err(HostError::Busy));
    assert_eq!(driver.clear().await, Err(HostError::Busy));
    // Busy is not an error worth showing.
    assert_eq!(driver.last_error(), None);

    engine.release_genmove();
    pending.await.unwrap().unwrap();
    assert!(!driver.is_thinking());
    assert!(driver.play((2, 2)).await.is_ok());
}

#[tokio::test]
async fn transport_failure_releases_latch() {
    let (driver, engine) = connected(9, GameMode::Manual);
    engine.state().fail_play = true;

    let err = driver.play((4, 4)).await.unwrap_err();
    assert!(matches!(err, HostError::Transport(_)));
    assert!(!driver.is_thinking());
    assert_eq!(driver.last_error(), Some(err.to_string()));
    assert!(driver.with_session(|s| s.history().is_empty()).await);

    engine.state().fail_play = false;
    driver.play((4, 4)).await.unwrap();
    assert_eq!(driver.last_error(), None);
}

#[tokio::test]
async fn rule_violation_releases_latch() {
    let (driver, engine) = connected(9, GameMode::Manual);
    driver.play((4, 4)).await.unwrap();

    assert_eq!(
        driver.play((4, 4)).await,
        Err(HostError::Eval(EvalError::OccupiedCell((4, 4))))
    );
    assert!(!driver.is_thinking());
    // Rejected locally, the engine never heard about it.
    assert_eq!(engine.count("play"), 1);
}

#[tokio::test]
async fn unreadable_engine_reply_is_rejected() {
    let (driver, engine) = connected(9, GameMode::Manual);
    engine.script(&["sideways"]);

    assert!(matches!(
        driver.engine_move().await,
        Err(HostError::Rejected(_))
    ));
    assert!(!driver.is_thinking());
    assert!(driver.last_error().is_some());
}

#[tokio::test]
async fn terminated_game_refuses_everything() {
    let (driver, _engine) = connected(9, GameMode::Manual);
    driver.resign(Stone::White).await.unwrap();

    let terminated = HostError::Eval(EvalError::GameTerminated(go_eval::Status::BlackWin));
    assert_eq!(driver.play((0, 0)).await, Err(terminated.clone()));
    assert_eq!(driver.pass().await, Err(terminated.clone()));
    assert_eq!(driver.engine_move().await, Err(terminated));
    assert!(!driver.is_thinking());
}
