use serde::{Deserialize, Serialize};

use crate::Point;
use crate::stone::Stone;

/// A single-stone ko left by the previous capture: `illegal` may not play at
/// `pos` on the very next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ko {
    pub pos: Point,
    pub illegal: Stone,
}

impl Ko {
    pub fn forbids(&self, point: Point, stone: Stone) -> bool {
        self.pos == point && self.illegal == stone
    }
}
