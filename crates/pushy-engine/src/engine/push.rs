use crate::core::{Board, Color, Direction, Position, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Blocked,
    Moved,
    Destroyed,
}

/// Outcome of pushing every movable square one cell in a direction.
///
/// Positions are reported as they were *before* the push.
#[derive(Debug, Clone)]
pub struct PushResolution {
    direction: Direction,
    board: Board,
    moved: Vec<Position>,
    destroyed: Vec<(Position, Color)>,
}

impl PushResolution {
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Board after the push.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Original positions of the squares that moved and survived.
    #[must_use]
    pub fn moved(&self) -> &[Position] {
        &self.moved
    }

    /// Original positions and colors of the squares pushed into a void.
    #[must_use]
    pub fn destroyed(&self) -> &[(Position, Color)] {
        &self.destroyed
    }

    /// Returns `true` when nothing moved and nothing was destroyed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.moved.is_empty() && self.destroyed.is_empty()
    }
}

/// Pushes every movable square on `board` one cell towards `direction`.
///
/// The push is resolved in a single pass: cells are visited leading edge first, so when a
/// square is examined the cell it would enter has already been decided. A square
///
/// - moves into an empty cell,
/// - moves into a void and is destroyed,
/// - moves into a cell whose square moves (or is destroyed) in the same push,
/// - and is blocked by the board edge, a wall, a grey square or a blocked square.
///
/// All outcomes are then applied at once, so the result does not depend on iteration order.
/// Grey squares never move.
///
/// # Example
///
/// ```
/// use pushy_engine::{Board, Direction, resolve_push};
///
/// let board: Board = "RB.x".parse().unwrap();
/// let pushed = resolve_push(&board, Direction::Right);
/// assert_eq!(pushed.board().to_string(), ".RBx");
/// assert_eq!(pushed.moved().len(), 2);
/// ```
#[must_use]
pub fn resolve_push(board: &Board, direction: Direction) -> PushResolution {
    let order = board.positions_leading_first(direction);

    // resolved outcome per cell, row-major
    let columns = board.columns();
    let slot = |pos: Position| -> usize {
        // positions here always come from the board itself
        usize::try_from(pos.y).unwrap_or_default() * columns
            + usize::try_from(pos.x).unwrap_or_default()
    };
    let mut outcomes: Vec<Option<Outcome>> = vec![None; board.columns() * board.rows()];

    for &pos in &order {
        let Some(Tile::Square(color)) = board.get(pos) else {
            continue;
        };
        let outcome = if color.is_grey() {
            Outcome::Blocked
        } else {
            match board.neighbor(pos, direction) {
                None => Outcome::Blocked,
                Some(next) => match board.get(next) {
                    Some(Tile::Empty) => Outcome::Moved,
                    Some(Tile::Void) => Outcome::Destroyed,
                    Some(Tile::Wall) | None => Outcome::Blocked,
                    Some(Tile::Square(_)) => match outcomes[slot(next)] {
                        Some(Outcome::Moved | Outcome::Destroyed) => Outcome::Moved,
                        Some(Outcome::Blocked) | None => Outcome::Blocked,
                    },
                },
            }
        };
        outcomes[slot(pos)] = Some(outcome);
    }

    let mut next_board = board.clone();
    let mut moved = Vec::new();
    let mut destroyed = Vec::new();
    let mut arrivals = Vec::new();
    for &pos in &order {
        let Some(Tile::Square(color)) = board.get(pos) else {
            continue;
        };
        match outcomes[slot(pos)] {
            Some(Outcome::Moved) => {
                moved.push(pos);
                arrivals.push((pos.step(direction), color));
                clear(&mut next_board, pos);
            }
            Some(Outcome::Destroyed) => {
                destroyed.push((pos, color));
                clear(&mut next_board, pos);
            }
            Some(Outcome::Blocked) | None => {}
        }
    }
    for (pos, color) in arrivals {
        // arrival cells were either empty or vacated in this push
        let placed = next_board.set(pos, Tile::Square(color));
        debug_assert!(placed.is_ok(), "arrival {pos} is off the board");
    }

    // report in row-major order regardless of scan direction
    moved.sort_by_key(|p| (p.y, p.x));
    destroyed.sort_by_key(|(p, _)| (p.y, p.x));

    PushResolution {
        direction,
        board: next_board,
        moved,
        destroyed,
    }
}

fn clear(board: &mut Board, pos: Position) {
    let cleared = board.set(pos, Tile::Empty);
    debug_assert!(cleared.is_ok(), "cleared cell {pos} is off the board");
}
