use serde::{Deserialize, Serialize};

use crate::core::{Color, Direction, Position};

/// A square placed on a spawnpoint at the end of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub color: Color,
    pub position: Position,
}

/// Everything a single move changed on the board.
///
/// `moved` and `destroyed` hold positions *before* the push (destroyed squares entered the
/// void one cell further in `direction`). `greyed_out` holds positions *after* the push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub direction: Direction,
    pub moved: Vec<Position>,
    pub destroyed: Vec<Position>,
    pub greyed_out: Vec<Position>,
    pub spawned: Option<Spawn>,
}

impl MoveResult {
    /// A result in which nothing happened.
    #[must_use]
    pub const fn noop(direction: Direction) -> Self {
        Self {
            direction,
            moved: Vec::new(),
            destroyed: Vec::new(),
            greyed_out: Vec::new(),
            spawned: None,
        }
    }

    /// Returns `true` if the move had no effect and did not consume a turn.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.moved.is_empty() && self.destroyed.is_empty()
    }
}
