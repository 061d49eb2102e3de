use std::collections::VecDeque;

use serde::Serialize;

use crate::Point;
use crate::goban::Goban;
use crate::stone::Stone;

/// A maximal connected set of empty points and the colour that owns it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub owner: Option<Stone>,
    pub points: Vec<Point>,
}

/// Territory point counts. `black + white + neutral` equals the number of
/// empty cells on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Territory {
    pub black: u32,
    pub white: u32,
    pub neutral: u32,
}

/// Partition every empty point into regions.
///
/// A region touching stones of exactly one colour belongs to that colour.
/// Regions touching both colours, or no stone at all (an open board that
/// only meets the edge), are neutral.
pub fn regions(goban: &Goban) -> Vec<Region> {
    let size = goban.size() as usize;
    let mut visited = vec![false; size * size];
    let mut regions = Vec::new();

    for start in goban.points() {
        let si = start.0 as usize * size + start.1 as usize;
        if visited[si] || goban.stone_at(start).is_some() {
            continue;
        }

        let mut points = Vec::new();
        let mut border_colors: u8 = 0; // bit 0 = Black seen, bit 1 = White seen
        let mut queue = VecDeque::from([start]);
        visited[si] = true;

        while let Some(p) = queue.pop_front() {
            points.push(p);
            for n in goban.neighbors(p) {
                match goban.stone_at(n) {
                    Some(Stone::Black) => border_colors |= 1,
                    Some(Stone::White) => border_colors |= 2,
                    None => {
                        let ni = n.0 as usize * size + n.1 as usize;
                        if !visited[ni] {
                            visited[ni] = true;
                            queue.push_back(n);
                        }
                    }
                }
            }
        }

        let owner = match border_colors {
            1 => Some(Stone::Black),
            2 => Some(Stone::White),
            _ => None,
        };
        regions.push(Region { owner, points });
    }

    regions
}

/// Count territory for both colours from scratch.
pub fn estimate(goban: &Goban) -> Territory {
    regions(goban)
        .iter()
        .fold(Territory::default(), |mut acc, region| {
            let n = region.points.len() as u32;
            match region.owner {
                Some(Stone::Black) => acc.black += n,
                Some(Stone::White) => acc.white += n,
                None => acc.neutral += n,
            }
            acc
        })
}

/// Per-point ownership in board layout: `1` Black, `-1` White, `0` neutral
/// or occupied.
pub fn ownership(goban: &Goban) -> Vec<i8> {
    let size = goban.size() as usize;
    let mut owned = vec![0i8; size * size];
    for region in regions(goban) {
        let Some(owner) = region.owner else {
            continue;
        };
        for (row, col) in region.points {
            owned[row as usize * size + col as usize] = owner.to_int();
        }
    }
    owned
}
