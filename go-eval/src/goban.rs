use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::Point;
use crate::config::{MAX_BOARD_SIZE, RulesConfig, SelfCapturePolicy};
use crate::error::EvalError;
use crate::ko::Ko;
use crate::stone::Stone;

/// Stones removed by a single placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    /// Opponent stones captured by the move.
    pub captured: Vec<Point>,
    /// The mover's own group, removed under `SelfCapturePolicy::RemoveOwn`.
    pub self_removed: Vec<Point>,
}

impl Placement {
    pub fn removed(&self) -> impl Iterator<Item = &Point> {
        self.captured.iter().chain(self.self_removed.iter())
    }
}

/// Square Go board stored as a flat row-major array of signed cells
/// (`1` Black, `-1` White, `0` empty). Points are `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Goban {
    board: Vec<i8>,
    size: u8,
    ko: Option<Ko>,
}

impl Goban {
    /// Create a goban from an existing board matrix (size x size of i8 values).
    pub fn new(board: Vec<Vec<i8>>) -> Self {
        let size = board.len();
        assert!(
            size as u8 <= MAX_BOARD_SIZE && board.iter().all(|row| row.len() == size),
            "malformed board matrix"
        );

        Goban {
            board: board
                .into_iter()
                .flatten()
                .map(|v| v.signum())
                .collect(),
            size: size as u8,
            ko: None,
        }
    }

    /// Create an empty board.
    pub fn with_size(size: u8) -> Self {
        assert!(size <= MAX_BOARD_SIZE, "board size {size} exceeds {MAX_BOARD_SIZE}");
        Goban {
            board: vec![0i8; size as usize * size as usize],
            size,
            ko: None,
        }
    }

    // -- Accessors --

    pub fn board(&self) -> &[i8] {
        &self.board
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn ko(&self) -> Option<&Ko> {
        self.ko.as_ref()
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            Stone::from_int(self.board[self.idx(point)])
        } else {
            None
        }
    }

    pub fn on_board(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    pub fn is_empty(&self) -> bool {
        self.board.iter().all(|&s| s == 0)
    }

    pub fn count(&self, stone: Stone) -> u32 {
        let v = stone.to_int();
        self.board.iter().filter(|&&s| s == v).count() as u32
    }

    pub fn empty_count(&self) -> u32 {
        self.board.iter().filter(|&&s| s == 0).count() as u32
    }

    /// Every on-board point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    // -- Mutation primitives --

    /// Put a stone on an empty cell. Captures are not resolved here.
    pub fn place(&mut self, point: Point, stone: Stone) -> Result<(), EvalError> {
        if !self.on_board(point) {
            return Err(EvalError::InvalidCoordinate(format!(
                "({}, {}) is outside a {}x{} board",
                point.0, point.1, self.size, self.size
            )));
        }
        if self.stone_at(point).is_some() {
            return Err(EvalError::OccupiedCell(point));
        }
        let i = self.idx(point);
        self.board[i] = stone.to_int();
        Ok(())
    }

    /// Empty a batch of cells in one step.
    pub fn remove(&mut self, points: &[Point]) {
        for &p in points {
            if self.on_board(p) {
                let i = self.idx(p);
                self.board[i] = 0;
            }
        }
    }

    /// Empty the whole board.
    pub fn clear(&mut self) {
        self.board.fill(0);
        self.ko = None;
    }

    /// A pass lifts any ko restriction.
    pub fn pass(&mut self) {
        self.ko = None;
    }

    /// Place a stone and resolve its consequences: opponent captures,
    /// self-capture policy, and single-stone ko bookkeeping. On error the
    /// board is left untouched.
    pub fn play(
        &mut self,
        point: Point,
        stone: Stone,
        rules: &RulesConfig,
    ) -> Result<Placement, EvalError> {
        if rules.forbid_immediate_recapture
            && self.on_board(point)
            && self.stone_at(point).is_none()
            && self.ko.is_some_and(|ko| ko.forbids(point, stone))
        {
            return Err(EvalError::KoViolation(point));
        }

        self.place(point, stone)?;
        let captured = self.resolve_captures(point);

        let own = self.chain(point);
        let mut self_removed = Vec::new();
        if !self.has_liberty(&own) {
            match rules.self_capture {
                SelfCapturePolicy::Forbid => {
                    // Nothing was captured, so undoing the single stone restores the board.
                    self.remove(&[point]);
                    return Err(EvalError::SelfCapture(point));
                }
                SelfCapturePolicy::Permit => {
                    tracing::debug!(?point, %stone, "stone left without liberties");
                }
                SelfCapturePolicy::RemoveOwn => {
                    self.remove(&own);
                    self_removed = own;
                }
            }
        }

        self.ko = self.detect_ko(point, stone, &captured);

        Ok(Placement {
            captured,
            self_removed,
        })
    }

    /// After a stone is placed at `point`, remove every adjacent opponent
    /// group left without liberties. Returns the removed points.
    pub fn resolve_captures(&mut self, point: Point) -> Vec<Point> {
        let mut captured = Vec::new();
        for chain in self.opponent_neighbor_chains(point) {
            if !self.has_liberty(&chain) {
                self.remove(&chain);
                captured.extend(chain);
            }
        }
        captured
    }

    // -- Graph algorithms --

    /// Get the 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (row, col): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if row > 0 {
            result.push((row - 1, col));
        }
        if row + 1 < self.size {
            result.push((row + 1, col));
        }
        if col > 0 {
            result.push((row, col - 1));
        }
        if col + 1 < self.size {
            result.push((row, col + 1));
        }
        result
    }

    /// Breadth-first traversal of the group containing `point`.
    pub fn chain(&self, point: Point) -> Vec<Point> {
        let mut visited = vec![false; self.board.len()];
        self.chain_from(point, &mut visited)
    }

    /// Distinct liberties of a pre-computed group.
    pub fn chain_liberties(&self, chain: &[Point]) -> Vec<Point> {
        let mut seen = vec![false; self.board.len()];
        let mut libs = Vec::new();
        for &p in chain {
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if !seen[ni] && self.board[ni] == 0 {
                    seen[ni] = true;
                    libs.push(n);
                }
            }
        }
        libs
    }

    pub fn liberties(&self, point: Point) -> Vec<Point> {
        self.chain_liberties(&self.chain(point))
    }

    /// Early-exit liberty check.
    pub fn has_liberty(&self, chain: &[Point]) -> bool {
        chain
            .iter()
            .any(|&p| self.neighbors(p).iter().any(|&n| self.board[self.idx(n)] == 0))
    }

    /// All groups currently on the board.
    pub fn groups(&self) -> Vec<Vec<Point>> {
        let mut visited = vec![false; self.board.len()];
        let mut groups = Vec::new();
        for p in self.points() {
            if self.stone_at(p).is_some() && !visited[self.idx(p)] {
                groups.push(self.chain_from(p, &mut visited));
            }
        }
        groups
    }

    /// Distinct opponent groups touching `point`.
    fn opponent_neighbor_chains(&self, point: Point) -> Vec<Vec<Point>> {
        let Some(stone) = self.stone_at(point) else {
            return Vec::new();
        };
        let opponent = stone.opp();

        let mut chains = Vec::new();
        let mut visited = vec![false; self.board.len()];
        for n in self.neighbors(point) {
            if self.stone_at(n) == Some(opponent) && !visited[self.idx(n)] {
                chains.push(self.chain_from(n, &mut visited));
            }
        }
        chains
    }

    /// Group flood-fill using a shared visited set.
    fn chain_from(&self, point: Point, visited: &mut [bool]) -> Vec<Point> {
        let Some(stone) = self.stone_at(point) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut queue = VecDeque::from([point]);
        visited[self.idx(point)] = true;

        while let Some(p) = queue.pop_front() {
            result.push(p);
            for n in self.neighbors(p) {
                let ni = self.idx(n);
                if !visited[ni] && self.stone_at(n) == Some(stone) {
                    visited[ni] = true;
                    queue.push_back(n);
                }
            }
        }

        result
    }

    fn detect_ko(&self, point: Point, stone: Stone, captured: &[Point]) -> Option<Ko> {
        let [taken] = captured else {
            return None;
        };
        let lone = self
            .neighbors(point)
            .iter()
            .all(|&n| self.stone_at(n) != Some(stone));
        let libs = self.liberties(point);
        (lone && libs.as_slice() == [*taken]).then_some(Ko {
            pos: *taken,
            illegal: stone.opp(),
        })
    }

    #[inline]
    fn idx(&self, (row, col): Point) -> usize {
        row as usize * self.size as usize + col as usize
    }
}

/// Build a goban from an ASCII layout. 'B' = Black, 'W' = White, anything else empty.
#[cfg(test)]
pub(crate) fn goban_from_layout(layout: &[&str]) -> Goban {
    let board: Vec<Vec<i8>> = layout
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    'B' => Stone::Black.to_int(),
                    'W' => Stone::White.to_int(),
                    _ => 0,
                })
                .collect()
        })
        .collect();
    Goban::new(board)
}
