use go_eval::{EvalConfig, SelfCapturePolicy, Session, territory};

use crate::common::{XorShift, config};

fn run_random_game(config: EvalConfig, seed: u64, attempts: usize) -> Session {
    let size = config.board_size;
    let mut session = Session::new(config).unwrap();
    let mut rng = XorShift::new(seed);

    for _ in 0..attempts {
        let point = (rng.below(size), rng.below(size));
        if session.play(point).is_err() {
            continue;
        }

        let goban = session.goban();
        for group in goban.groups() {
            assert!(
                goban.has_liberty(&group),
                "group at {:?} has no liberties after move {}",
                group[0],
                session.move_count()
            );
        }

        let regions = territory::regions(goban);
        let covered: usize = regions.iter().map(|r| r.points.len()).sum();
        assert_eq!(covered as u32, goban.empty_count());
    }
    session
}

#[test]
fn no_group_left_without_liberties() {
    for seed in [1, 7, 42, 2024] {
        run_random_game(config(9), seed, 400);
    }
}

#[test]
fn remove_own_policy_keeps_the_invariant() {
    let mut config = config(7);
    config.rules.self_capture = SelfCapturePolicy::RemoveOwn;
    run_random_game(config, 99, 300);
}

#[test]
fn win_rates_are_complementary() {
    let session = run_random_game(config(9), 5, 200);
    assert!(!session.series().win_rate.is_empty());
    for point in &session.series().win_rate {
        assert!((point.black + point.white - 1.0).abs() < 1e-9);
        assert!((0.03..=0.97).contains(&point.black));
    }
}

#[test]
fn refresh_twice_is_stable() {
    let mut session = run_random_game(config(9), 11, 120);
    let first = *session.refresh_evaluation();
    let second = *session.refresh_evaluation();
    assert_eq!(first, second);
}

#[test]
fn territory_plus_stones_never_exceed_board() {
    let session = run_random_game(config(9), 3, 150);
    let e = session.evaluation();
    let total = e.black_stones + e.white_stones + e.black_territory + e.white_territory;
    assert!(total <= 81);
}
