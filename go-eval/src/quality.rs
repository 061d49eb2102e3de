use crate::Point;
use crate::config::QualityWeights;
use crate::goban::Goban;
use crate::hoshi;
use crate::stone::Stone;

/// Rate the move just played at `point` by `stone`.
///
/// `goban` is the position after captures were resolved, `move_number` is
/// 1-based. The result lies in `[w.min, w.max]` and is rounded to three
/// decimals.
pub fn score(
    goban: &Goban,
    point: Point,
    stone: Stone,
    captured: usize,
    move_number: usize,
    w: &QualityWeights,
) -> f64 {
    let size = goban.size();
    let opening = move_number < w.opening_until;
    let endgame = move_number >= w.endgame_from;

    let mut quality = if opening {
        w.opening_base + (move_number as f64 / w.opening_until as f64) * w.opening_ramp
    } else if endgame {
        w.endgame_base
    } else {
        w.middle_base
    };

    if captured > 0 {
        quality += (w.capture_per_stone * captured as f64).min(w.capture_cap);
    }

    if move_number < w.star_until && hoshi::is_star_point(size, point) {
        quality += w.star_bonus;
    }

    let center = u32::from(size.saturating_sub(1) / 2);
    let center_distance =
        u32::from(point.0).abs_diff(center) + u32::from(point.1).abs_diff(center);
    if !opening && !endgame && center > 0 {
        let closeness = 1.0 - (f64::from(center_distance) / f64::from(2 * center)) * w.center_falloff;
        quality += closeness * w.center_bonus;
    }

    if endgame {
        let near_edge = |x: u8| x < w.edge_band || x > size.saturating_sub(1 + w.edge_band);
        let (row_edge, col_edge) = (near_edge(point.0), near_edge(point.1));
        if row_edge && col_edge {
            quality += w.corner_bonus;
        } else if row_edge || col_edge {
            quality += w.edge_bonus;
        }
    }

    let mut friendly = 0u32;
    let mut empty = 0usize;
    for n in goban.neighbors(point) {
        match goban.stone_at(n) {
            Some(s) if s == stone => friendly += 1,
            None => empty += 1,
            Some(_) => {}
        }
    }
    if friendly > 0 {
        quality += (f64::from(friendly) * w.connection_per_stone).min(w.connection_cap);
    }
    if empty > 0 {
        quality += w.liberty_bonus[empty.min(3) - 1];
    }

    if opening && captured == 0 && friendly == 0 && center_distance > w.isolation_distance {
        quality -= w.isolation_penalty;
    }

    (quality.clamp(w.min, w.max) * 1000.0).round() / 1000.0
}
