use go_eval::{Session, Stone};

use crate::common::config;

#[test]
fn empty_board_has_no_influence() {
    let session = Session::default();
    let field = session.influence();
    assert!(field.values().iter().all(|&v| v == 0.0));
}

#[test]
fn single_center_stone_decays_with_distance() {
    let mut session = Session::default();
    session.play_as((9, 9), Stone::Black).unwrap();
    let field = session.influence();

    assert_eq!(field.get((9, 9)), Some(1.0));
    assert!(field.values().iter().all(|&v| (0.0..=1.0).contains(&v)));

    let mut previous = field.get((9, 9)).unwrap();
    for d in 1..=6u8 {
        let here = field.get((9, 9 + d)).unwrap();
        assert!(here < previous, "distance {d}: {here} >= {previous}");
        assert_eq!(field.get((9 + d, 9)), Some(here));
        assert_eq!(field.get((9, 9 - d)), Some(here));
        previous = here;
    }
    assert_eq!(field.get((9, 16)), Some(0.0));
    assert_eq!(field.get((0, 0)), Some(0.0));
    assert_eq!(field.get((9, 19)), None);
}

#[test]
fn field_stays_normalized_in_a_real_position() {
    let mut session = Session::new(config(9)).unwrap();
    for point in [(2, 2), (6, 6), (2, 6), (6, 2), (4, 4), (4, 5), (3, 4)] {
        session.play(point).unwrap();
    }
    let field = session.influence();
    assert!(field.values().iter().all(|&v| (-1.0..=1.0).contains(&v)));
    assert!((field.max_abs() - 1.0).abs() < 1e-12);
}
