use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell address on the board.
///
/// `x` is the column (growing rightwards) and `y` is the row (growing downwards).
/// Coordinates are signed so that stepping off the board yields a representable
/// position; [`Board::in_bounds`](super::Board::in_bounds) decides whether it is addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position one cell away in `direction`, without bounds checks.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance between two positions.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four directions a move can push the squares in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[display("up")]
    Up,
    #[display("right")]
    Right,
    #[display("down")]
    Down,
    #[display("left")]
    Left,
}

impl Direction {
    /// All directions, in the priority order used to break ties between equally good moves.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Column and row delta of a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid direction: {input:?} (expected up/down/left/right or w/a/s/d)")]
pub struct ParseDirectionError {
    input: String,
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts direction names as well as the `w`/`a`/`s`/`d` keys, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "w" => Ok(Self::Up),
            "right" | "r" | "d" => Ok(Self::Right),
            "down" | "s" => Ok(Self::Down),
            "left" | "l" | "a" => Ok(Self::Left),
            _ => Err(ParseDirectionError {
                input: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_follows_offsets() {
        let p = Position::new(3, 3);
        assert_eq!(p.step(Direction::Up), Position::new(3, 2));
        assert_eq!(p.step(Direction::Right), Position::new(4, 3));
        assert_eq!(p.step(Direction::Down), Position::new(3, 4));
        assert_eq!(p.step(Direction::Left), Position::new(2, 3));
    }

    #[test]
    fn test_step_and_opposite_cancel_out() {
        let p = Position::new(1, 2);
        for dir in Direction::ALL {
            assert_eq!(p.step(dir).step(dir.opposite()), p, "direction {dir}");
        }
    }

    #[test]
    fn test_step_off_board_is_representable() {
        let p = Position::new(0, 0);
        assert_eq!(p.step(Direction::Left), Position::new(-1, 0));
        assert_eq!(p.step(Direction::Up), Position::new(0, -1));
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(Position::new(0, 0).manhattan_distance(Position::new(2, 3)), 5);
        assert_eq!(Position::new(4, 1).manhattan_distance(Position::new(1, 1)), 3);
        assert_eq!(Position::new(2, 2).manhattan_distance(Position::new(2, 2)), 0);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("W".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!(" a ".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("s".parse::<Direction>().unwrap(), Direction::Down);
        assert_eq!("Right".parse::<Direction>().unwrap(), Direction::Right);
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(2, -1).to_string(), "(2, -1)");
        assert_eq!(Direction::Left.to_string(), "left");
    }
}
