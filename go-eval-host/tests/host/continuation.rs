use std::time::Duration;

use go_eval::{Status, Stone};
use go_eval_host::GameMode;

use crate::common::{connected, settle};

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn engine_replies_after_human_move() {
    let (driver, engine) = connected(19, GameMode::VsEngine);
    engine.script(&["Q16"]);

    driver.play((15, 3)).await.unwrap();
    assert!(driver.has_pending_continuation());

    advance(399).await;
    assert_eq!(engine.count("genmove"), 0);

    advance(2).await;
    assert_eq!(engine.count("genmove"), 1);
    let last = driver
        .with_session(|s| *s.history().last_move().unwrap())
        .await;
    assert_eq!(last.point, (3, 15));
    assert_eq!(last.stone, Stone::White);
    assert!(!driver.has_pending_continuation());
    // Only engine-only mode chains engine moves.
    advance(2000).await;
    assert_eq!(engine.count("genmove"), 1);
}

#[tokio::test(start_paused = true)]
async fn manual_mode_never_continues() {
    let (driver, engine) = connected(19, GameMode::Manual);
    driver.play((15, 3)).await.unwrap();
    assert!(!driver.has_pending_continuation());
    advance(5000).await;
    assert_eq!(engine.count("genmove"), 0);
}

#[tokio::test(start_paused = true)]
async fn engine_plays_itself_until_the_game_ends() {
    let (driver, engine) = connected(19, GameMode::Manual);
    engine.script(&["D4", "Q16", "resign"]);

    driver.set_mode(GameMode::EngineOnly).await;
    assert!(driver.has_pending_continuation());

    advance(500).await;
    assert_eq!(driver.with_session(|s| s.move_count()).await, 1);
    advance(800).await;
    assert_eq!(driver.with_session(|s| s.move_count()).await, 2);
    advance(800).await;

    assert_eq!(driver.with_session(|s| s.status()).await, Status::WhiteWin);
    assert!(!driver.has_pending_continuation());
    assert_eq!(engine.count("genmove"), 3);
    assert_eq!(driver.last_error(), None);
}

#[tokio::test(start_paused = true)]
async fn a_newer_move_supersedes_the_pending_continuation() {
    let (driver, engine) = connected(19, GameMode::VsEngine);
    engine.script(&["Q4", "C3"]);

    driver.play((15, 3)).await.unwrap();
    advance(100).await;
    // The human also plays White before the engine gets to it.
    driver.play((3, 15)).await.unwrap();

    advance(350).await;
    assert_eq!(engine.count("genmove"), 0);
    advance(100).await;
    assert_eq!(engine.count("genmove"), 1);
    advance(2000).await;
    assert_eq!(engine.count("genmove"), 1);
}

#[tokio::test(start_paused = true)]
async fn resignation_cancels_the_continuation() {
    let (driver, engine) = connected(19, GameMode::VsEngine);
    engine.script(&["Q16"]);

    driver.play((15, 3)).await.unwrap();
    driver.resign(Stone::Black).await.unwrap();
    assert!(!driver.has_pending_continuation());

    advance(2000).await;
    assert_eq!(engine.count("genmove"), 0);
}

#[tokio::test(start_paused = true)]
async fn switching_to_manual_cancels() {
    let (driver, engine) = connected(19, GameMode::VsEngine);
    driver.play((15, 3)).await.unwrap();
    driver.set_mode(GameMode::Manual).await;
    assert!(!driver.has_pending_continuation());

    advance(2000).await;
    assert_eq!(engine.count("genmove"), 0);
}

#[tokio::test(start_paused = true)]
async fn engine_pass_still_continues_in_engine_only_mode() {
    let (driver, engine) = connected(19, GameMode::Manual);
    engine.script(&["pass", "pass"]);

    driver.set_mode(GameMode::EngineOnly).await;
    advance(500).await;
    assert_eq!(driver.with_session(|s| s.status()).await, Status::Playing);
    advance(800).await;
    // Two passes on an empty board: komi decides.
    assert_eq!(driver.with_session(|s| s.status()).await, Status::WhiteWin);
    assert!(!driver.has_pending_continuation());
}
