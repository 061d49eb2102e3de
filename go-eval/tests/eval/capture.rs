use go_eval::{EvalConfig, EvalError, SelfCapturePolicy, Session, Stone};

use crate::common::config;

/// White at (0,1) and (1,0) share their last liberty at (0,0).
#[test]
fn encircled_stones_are_removed() {
    let mut session = Session::new(config(9)).unwrap();
    session.play_as((0, 1), Stone::White).unwrap();
    session.play_as((1, 0), Stone::White).unwrap();
    session.play_as((0, 2), Stone::Black).unwrap();
    session.play_as((1, 1), Stone::Black).unwrap();
    session.play_as((2, 0), Stone::Black).unwrap();

    let outcome = session.play_as((0, 0), Stone::Black).unwrap();

    let mut captured = outcome.captured.clone();
    captured.sort();
    assert_eq!(captured, vec![(0, 1), (1, 0)]);
    assert_eq!(session.goban().stone_at((0, 1)), None);
    assert_eq!(session.goban().stone_at((1, 0)), None);
    assert_eq!(session.goban().stone_at((0, 0)), Some(Stone::Black));
    assert_eq!(session.evaluation().black_captures, 2);
}

#[test]
fn capture_records_track_running_totals() {
    let mut session = Session::new(config(9)).unwrap();
    let moves = [
        ((0, 1), Stone::Black),
        ((0, 0), Stone::White),
        ((1, 0), Stone::Black), // takes (0,0)
        ((8, 7), Stone::Black),
        ((8, 8), Stone::White),
        ((7, 8), Stone::Black), // takes (8,8)
        ((4, 4), Stone::White),
    ];
    for (point, stone) in moves {
        session.play_as(point, stone).unwrap();
    }

    let records = session.history().captures();
    assert_eq!(records.len(), moves.len());
    let per_move: Vec<usize> = records.iter().map(|r| r.captured.len()).collect();
    assert_eq!(per_move, vec![0, 0, 1, 0, 0, 1, 0]);

    let mut running = 0;
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.move_number, i + 1);
        running += record.captured.len() as u32;
        assert_eq!(record.totals.black + record.totals.white, running);
    }
    assert_eq!(session.history().capture_totals().black, 2);
}

#[test]
fn suicide_rejected_by_default() {
    let mut session = Session::new(config(9)).unwrap();
    session.play_as((0, 1), Stone::White).unwrap();
    session.play_as((1, 0), Stone::White).unwrap();

    assert_eq!(
        session.play_as((0, 0), Stone::Black),
        Err(EvalError::SelfCapture((0, 0)))
    );
    assert_eq!(session.goban().stone_at((0, 0)), None);
    assert_eq!(session.history().len(), 2);
}

#[test]
fn permit_policy_keeps_the_stone() {
    let mut config = EvalConfig {
        board_size: 9,
        ..EvalConfig::default()
    };
    config.rules.self_capture = SelfCapturePolicy::Permit;
    let mut session = Session::new(config).unwrap();
    session.play_as((0, 1), Stone::White).unwrap();
    session.play_as((1, 0), Stone::White).unwrap();

    let outcome = session.play_as((0, 0), Stone::Black).unwrap();
    assert!(outcome.captured.is_empty());
    assert!(outcome.self_removed.is_empty());
    assert_eq!(session.goban().stone_at((0, 0)), Some(Stone::Black));
}
