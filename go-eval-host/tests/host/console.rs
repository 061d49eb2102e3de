use go_eval_host::console::{self, Command};
use go_eval_host::{Driver, GameMode};

use crate::common::host_config;

async fn run(driver: &Driver<go_eval_host::Offline>, line: &str) -> String {
    let command = Command::parse(line, driver.config().eval.board_size).unwrap();
    console::execute(driver, command).await.unwrap()
}

#[tokio::test]
async fn offline_session_through_the_console() {
    let driver = Driver::offline(host_config(19, GameMode::Manual)).unwrap();

    assert_eq!(run(&driver, "D4").await, "B D4 (quality 0.543)");
    assert!(run(&driver, "play Q16").await.starts_with("W Q16"));
    assert_eq!(
        run(&driver, "status").await,
        "playing, B to play, 2 moves, mode manual, offline"
    );

    let history = run(&driver, "history").await;
    assert_eq!(history.lines().next(), Some("1. B D4 (0.543)"));
    assert_eq!(history.lines().count(), 2);

    assert!(run(&driver, "eval").await.contains("win rate B"));
    assert!(run(&driver, "series").await.starts_with("move 2:"));
    assert_eq!(run(&driver, "suggest").await, "no suggestions");
}

#[tokio::test]
async fn errors_surface_as_host_errors() {
    let driver = Driver::offline(host_config(19, GameMode::Manual)).unwrap();
    run(&driver, "D4").await;
    let command = Command::parse("D4", 19).unwrap();
    let err = console::execute(&driver, command).await.unwrap_err();
    assert!(err.to_string().contains("occupied"));
}

#[tokio::test]
async fn baseline_shows_in_series() {
    let driver = Driver::offline(host_config(19, GameMode::Manual)).unwrap();
    run(&driver, "D4").await;
    run(&driver, "baseline first try").await;
    let series = run(&driver, "series").await;
    assert!(series.contains("first try at move 1"));
    run(&driver, "unbaseline").await;
    assert!(!run(&driver, "series").await.contains("first try"));
}

#[tokio::test]
async fn snapshot_is_json() {
    let driver = Driver::offline(host_config(9, GameMode::VsEngine)).unwrap();
    run(&driver, "E5").await;
    let snapshot: serde_json::Value =
        serde_json::from_str(&run(&driver, "snapshot").await).unwrap();

    assert_eq!(snapshot["mode"], "vs_engine");
    assert_eq!(snapshot["connected"], false);
    assert_eq!(snapshot["session"]["status"], "playing");
    assert_eq!(snapshot["session"]["to_play"], -1);
    assert_eq!(snapshot["session"]["move_count"], 1);
    assert_eq!(snapshot["session"]["last_move"]["point"], serde_json::json!([4, 4]));
    assert_eq!(snapshot["session"]["evaluation"]["black_stones"], 1);
    assert_eq!(snapshot["suggestions"], serde_json::json!([]));
    assert!(snapshot["last_error"].is_null());
}
