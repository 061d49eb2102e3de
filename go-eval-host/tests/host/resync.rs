use go_eval::Stone;
use go_eval_host::GameMode;

use crate::common::connected;

#[tokio::test]
async fn engine_board_wins_after_each_move() {
    let (driver, engine) = connected(9, GameMode::Manual);
    engine.sneak((0, 0), Stone::White);

    driver.play((4, 4)).await.unwrap();

    driver
        .with_session(|s| {
            assert_eq!(s.goban().stone_at((0, 0)), Some(Stone::White));
            assert_eq!(s.goban().stone_at((4, 4)), Some(Stone::Black));
            assert_eq!(s.history().len(), 1);
            assert_eq!(s.evaluation().white_stones, 1);
        })
        .await;
    assert_eq!(engine.count("showboard"), 1);
}

#[tokio::test]
async fn malformed_dump_keeps_local_board() {
    let (driver, engine) = connected(9, GameMode::Manual);
    engine.state().malformed_board = true;
    engine.sneak((0, 0), Stone::White);

    driver.play((4, 4)).await.unwrap();

    driver
        .with_session(|s| {
            assert_eq!(s.goban().stone_at((0, 0)), None);
            assert_eq!(s.goban().stone_at((4, 4)), Some(Stone::Black));
        })
        .await;
    assert_eq!(driver.last_error(), None);
}

#[tokio::test]
async fn showboard_failure_keeps_local_board() {
    let (driver, engine) = connected(9, GameMode::Manual);
    engine.state().fail_showboard = true;

    driver.play((4, 4)).await.unwrap();
    assert_eq!(
        driver
            .with_session(|s| s.goban().stone_at((4, 4)))
            .await,
        Some(Stone::Black)
    );
}

#[tokio::test]
async fn synchronize_pulls_the_engine_position() {
    let (driver, engine) = connected(9, GameMode::Manual);
    engine.sneak((2, 2), Stone::Black);
    engine.sneak((6, 6), Stone::White);

    driver.synchronize().await.unwrap();
    driver
        .with_session(|s| {
            assert_eq!(s.goban().count(Stone::Black), 1);
            assert_eq!(s.goban().count(Stone::White), 1);
            assert!(s.history().is_empty());
        })
        .await;

    engine.state().malformed_board = true;
    assert!(driver.synchronize().await.is_err());
    assert!(driver.last_error().is_some());
    assert_eq!(driver.with_session(|s| s.goban().count(Stone::Black)).await, 1);
}
